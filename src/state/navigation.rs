//! Navigation-related state types.
//!
//! This module contains the screens the application can show and the focus
//! positions within the item form.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    ConfigurationRequired,
    Loading,
    Form,
    LoadFailed,
}

/// Specifying the focusable positions of the item form. Columns are
/// addressed by their position among the input columns.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    ItemName,
    Column(usize),
    Submit,
}

impl FormField {
    fn index(self, column_count: usize) -> usize {
        match self {
            FormField::ItemName => 0,
            FormField::Column(i) => 1 + i.min(column_count.saturating_sub(1)),
            FormField::Submit => column_count + 1,
        }
    }

    fn from_index(index: usize, column_count: usize) -> Self {
        match index {
            0 => FormField::ItemName,
            i if i <= column_count => FormField::Column(i - 1),
            _ => FormField::Submit,
        }
    }

    /// Returns the following position, wrapping from submit to the name.
    ///
    pub fn next(self, column_count: usize) -> Self {
        let total = column_count + 2;
        FormField::from_index((self.index(column_count) + 1) % total, column_count)
    }

    /// Returns the preceding position, wrapping from the name to submit.
    ///
    pub fn previous(self, column_count: usize) -> Self {
        let total = column_count + 2;
        FormField::from_index(
            (self.index(column_count) + total - 1) % total,
            column_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_columns() {
        let mut field = FormField::ItemName;
        let mut visited = vec![field];
        for _ in 0..4 {
            field = field.next(2);
            visited.push(field);
        }
        assert_eq!(
            visited,
            vec![
                FormField::ItemName,
                FormField::Column(0),
                FormField::Column(1),
                FormField::Submit,
                FormField::ItemName,
            ]
        );
    }

    #[test]
    fn test_previous_wraps_to_submit() {
        assert_eq!(FormField::ItemName.previous(3), FormField::Submit);
        assert_eq!(FormField::Submit.previous(3), FormField::Column(2));
        assert_eq!(FormField::Column(0).previous(3), FormField::ItemName);
    }

    #[test]
    fn test_form_without_columns() {
        assert_eq!(FormField::ItemName.next(0), FormField::Submit);
        assert_eq!(FormField::Submit.next(0), FormField::ItemName);
        assert_eq!(FormField::Submit.previous(0), FormField::ItemName);
    }

    #[test]
    fn test_view() {
        assert_eq!(View::Form, View::Form);
        assert_ne!(View::Loading, View::LoadFailed);
        assert_ne!(View::ConfigurationRequired, View::Form);
    }
}
