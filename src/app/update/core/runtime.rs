use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use tracing::{info, warn};

const CLIENT_UNAVAILABLE: &str = "The backend client is not available; check server.base_url";

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        if let Effect::QuitSafely = effect {
            if self.timer.stopwatch.holds_session() {
                warn!(
                    session_id = ?self.timer.stopwatch.session_id(),
                    elapsed_secs = self.timer.stopwatch.elapsed_secs(),
                    "Quitting with an unsaved timed session"
                );
            }
            info!("Exiting");
            return iced::exit();
        }

        let Some(client) = self.client.clone() else {
            warn!("Dropping backend call without a client");
            return unavailable_message(effect)
                .map(Task::done)
                .unwrap_or_else(Task::none);
        };

        match effect {
            Effect::SignIn { email, password } => {
                info!(%email, "Dispatching sign-in");
                Task::perform(
                    async move {
                        client
                            .sign_in(&email, &password)
                            .await
                            .map_err(|err| format!("{err:#}"))
                    },
                    Message::SignedIn,
                )
            }
            Effect::LoadLibrary => Task::perform(
                async move {
                    client
                        .load_library()
                        .await
                        .map_err(|err| format!("{err:#}"))
                },
                Message::LibraryLoaded,
            ),
            Effect::SearchCatalog { request_id, query } => {
                info!(request_id, %query, "Dispatching catalog search");
                Task::perform(
                    async move {
                        let result = client
                            .search_catalog(&query)
                            .await
                            .map_err(|err| format!("{err:#}"));
                        Message::SearchCompleted { request_id, result }
                    },
                    |message| message,
                )
            }
            Effect::LoadCover(url) => Task::perform(
                async move {
                    let bytes = match client.fetch_cover(&url).await {
                        Ok(bytes) => Some(bytes),
                        Err(err) => {
                            warn!(%url, "Cover unavailable: {err:#}");
                            None
                        }
                    };
                    Message::CoverLoaded { url, bytes }
                },
                |message| message,
            ),
            Effect::AddBook { origin, book } => Task::perform(
                async move {
                    let result = client
                        .add_book(&book)
                        .await
                        .map_err(|err| format!("{err:#}"));
                    Message::BookAdded {
                        origin,
                        title: book.title,
                        result,
                    }
                },
                |message| message,
            ),
            Effect::LogReading(entry) => Task::perform(
                async move {
                    client
                        .log_reading(&entry)
                        .await
                        .map_err(|err| format!("{err:#}"))
                },
                Message::ReadingLogged,
            ),
            Effect::OpenSession { run, book_id } => {
                info!(run, book_id, "Opening timed session");
                Task::perform(
                    async move {
                        let result = client
                            .start_session(book_id)
                            .await
                            .map_err(|err| format!("{err:#}"));
                        Message::SessionOpened { run, result }
                    },
                    |message| message,
                )
            }
            Effect::FinalizeSession(request) => {
                info!(
                    session_id = request.session_id,
                    end_page = request.end_page,
                    "Finalizing timed session"
                );
                Task::perform(
                    async move {
                        client
                            .finalize_session(request)
                            .await
                            .map_err(|err| format!("{err:#}"))
                    },
                    Message::SessionSaved,
                )
            }
            Effect::LoadHistory { target, book_id } => Task::perform(
                async move {
                    let result = client
                        .session_history(book_id)
                        .await
                        .map_err(|err| format!("{err:#}"));
                    Message::HistoryLoaded {
                        target,
                        book_id,
                        result,
                    }
                },
                |message| message,
            ),
            Effect::QuitSafely => iced::exit(),
        }
    }
}

/// Completion a backend effect reports when there is no client to run it.
fn unavailable_message(effect: Effect) -> Option<Message> {
    fn failed<T>() -> Result<T, String> {
        Err(CLIENT_UNAVAILABLE.to_string())
    }

    match effect {
        Effect::SignIn { .. } => Some(Message::SignedIn(failed())),
        Effect::LoadLibrary => Some(Message::LibraryLoaded(failed())),
        Effect::SearchCatalog { request_id, .. } => Some(Message::SearchCompleted {
            request_id,
            result: failed(),
        }),
        Effect::LoadCover(url) => Some(Message::CoverLoaded { url, bytes: None }),
        Effect::AddBook { origin, book } => Some(Message::BookAdded {
            origin,
            title: book.title,
            result: failed(),
        }),
        Effect::LogReading(_) => Some(Message::ReadingLogged(failed())),
        Effect::OpenSession { run, .. } => Some(Message::SessionOpened {
            run,
            result: failed(),
        }),
        Effect::FinalizeSession(_) => Some(Message::SessionSaved(failed())),
        Effect::LoadHistory { target, book_id } => Some(Message::HistoryLoaded {
            target,
            book_id,
            result: failed(),
        }),
        Effect::QuitSafely => None,
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            // Escape must still close overlays while a text input has focus.
            if status == event::Status::Captured
                && key != keyboard::Key::Named(keyboard::key::Named::Escape)
            {
                return None;
            }
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
