use crate::config::Config;
use crate::error::AppError;
use crate::events::storage::{Event as StorageEvent, Handler as StorageEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{self, LogBuffer};
use crate::schema::FieldSchema;
use crate::state::State;
use crate::store::{FileStorage, RecordStore};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::Mutex;

pub type StorageEventSender = std::sync::mpsc::Sender<StorageEvent>;
type StorageEventReceiver = std::sync::mpsc::Receiver<StorageEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
    schema: Arc<FieldSchema>,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_buffer = LogBuffer::new();
        logger::init(config.level_filter()?, log_buffer.clone())?;

        info!("Starting application...");
        let schema = Arc::new(FieldSchema::season_2025()?);
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using the default.", config.theme_name);
            Theme::default()
        });
        let (tx, rx) = std::sync::mpsc::channel::<StorageEvent>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(
                tx.clone(),
                schema.clone(),
                theme,
                config.hotkeys.clone(),
                log_buffer,
            ))),
            config,
            schema,
        };
        let worker = app.start_storage(rx)?;
        let ui_result = app.start_ui(tx).await;

        // Once the last sender is gone the worker drains queued writes and exits.
        app.state.lock().await.disconnect_storage();
        if worker.join().is_err() {
            error!("Storage worker panicked before finishing its queue.");
        }

        info!("Exiting application...");
        ui_result
    }

    /// Start a separate thread for storage reads and writes. Events are
    /// handled one at a time in the order they were sent.
    ///
    fn start_storage(&self, receiver: StorageEventReceiver) -> Result<JoinHandle<()>> {
        let data_dir = self.config.data_dir()?;
        debug!(
            "Creating new thread for storage in {}...",
            data_dir.display()
        );
        let store = RecordStore::new(FileStorage::new(data_dir), self.schema.clone());
        let cloned_state = Arc::clone(&self.state);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;
        let handle = std::thread::spawn(move || {
            runtime.block_on(async {
                let mut storage_event_handler = StorageEventHandler::new(&cloned_state, &store);
                while let Ok(storage_event) = receiver.recv() {
                    if let Err(e) = storage_event_handler.handle(storage_event).await {
                        error!("Failed to handle storage event: {}", e);
                    }
                }
            })
        });
        Ok(handle)
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self, storage_sender: StorageEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        storage_sender.send(StorageEvent::Load)?;
        drop(storage_sender);

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
