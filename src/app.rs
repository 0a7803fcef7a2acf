use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{self, LogBuffer, LOG_CAPACITY};
use crate::monday::{BoardGateway, Monday};
use crate::state::State;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_buffer = Arc::new(LogBuffer::new(LOG_CAPACITY));
        logger::init(Arc::clone(&log_buffer), LevelFilter::Debug)?;

        info!("Starting application...");
        let notice = config.notice();
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let state = State::new(
            notice.is_none().then_some(tx),
            config.board_id.clone(),
            notice.clone(),
            Theme::by_name(&config.theme_name),
            log_buffer,
        );
        let app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };

        match notice {
            None => {
                app.start_network(rx)?;
                app.state.lock().await.start_loading(false);
            }
            Some(notice) => warn!("Configuration incomplete: {}", notice),
        }
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations. Each event
    /// is handled in its own task.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let gateway: Arc<dyn BoardGateway> = Arc::new(Monday::new(
            self.config.require_token()?,
            &self.config.api_url,
        )?);
        let network_event_handler = NetworkEventHandler::new(
            Arc::clone(&self.state),
            gateway,
            self.config.cache.policy(),
            self.config.create.policy(),
        );
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;

        std::thread::spawn(move || {
            runtime.block_on(async move {
                while let Ok(network_event) = net_receiver.recv() {
                    let handler = network_event_handler.clone();
                    tokio::spawn(async move { handler.handle(network_event).await });
                }
            })
        });
        Ok(())
    }

    /// Switch the terminal to the alternate screen and run the render loop,
    /// restoring the terminal afterwards even if the loop failed.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        execute!(stdout(), EnterAlternateScreen)?;
        enable_raw_mode()?;

        let result = self.run_ui().await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        result
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn run_ui(&self) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal.hide_cursor()?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            if let Ok(size) = terminal.size() {
                state.set_terminal_size(size);
            };
            terminal.draw(|frame| crate::ui::render(frame, &state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }

        terminal.show_cursor()?;
        Ok(())
    }
}
