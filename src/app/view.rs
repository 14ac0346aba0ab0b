use super::messages::{LogField, ManualField, Message};
use super::state::{
    App, CoverState, HistoryStatus, HistoryView, Notice, NoticeKind, SearchStatus, Tab,
};
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, center, column, container, horizontal_space, image, mouse_area, opaque,
    pick_list, row, scrollable, stack, text, text_input,
};
use iced::{Color, Element, Length};
use reading_tracker_core::{CatalogBook, StopwatchPhase};

const COVER_WIDTH: f32 = 80.0;
const COVER_HEIGHT: f32 = 120.0;
const DESCRIPTION_PREVIEW_CHARS: usize = 220;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let panel = match self.active_tab {
            Tab::Library => self.library_panel(),
            Tab::Search => self.search_panel(),
            Tab::ManualAdd => self.manual_panel(),
            Tab::ReadingLog => self.reading_log_panel(),
            Tab::Stopwatch => self.stopwatch_panel(),
        };

        let content = column![
            self.header(),
            self.tab_bar(),
            scrollable(container(panel).width(Length::Fill).padding([8, 4]))
                .height(Length::Fill),
        ]
        .padding(16)
        .spacing(12)
        .height(Length::Fill);

        let mut layered: Element<'_, Message> = content.into();
        if let Some(history) = &self.history_modal {
            layered = modal(layered, self.history_modal_card(history), Message::CloseModal);
        }
        if let Some(notice) = &self.notice {
            layered = modal(layered, notice_card(notice), Message::DismissNotice);
        }
        layered
    }

    fn header(&self) -> Element<'_, Message> {
        let title = text("Reading Tracker").size(26);
        if self.auth.signed_in {
            let refresh = button("Refresh").on_press_maybe(
                (!self.library.loading).then_some(Message::RefreshLibrary),
            );
            return row![
                title,
                horizontal_space(),
                text(format!("Signed in as {}", self.auth.email.trim())),
                refresh,
            ]
            .spacing(12)
            .align_y(Vertical::Center)
            .into();
        }

        let sign_in = button(if self.auth.signing_in {
            "Signing in..."
        } else {
            "Sign in"
        })
        .on_press_maybe((!self.auth.signing_in).then_some(Message::SignIn));
        let mut form = row![
            title,
            horizontal_space(),
            text_input("Email", &self.auth.email)
                .on_input(Message::EmailChanged)
                .width(Length::Fixed(220.0)),
            text_input("Password", &self.auth.password)
                .secure(true)
                .on_input(Message::PasswordChanged)
                .on_submit(Message::SignIn)
                .width(Length::Fixed(180.0)),
            sign_in,
        ]
        .spacing(12)
        .align_y(Vertical::Center);
        if let Some(err) = &self.auth.error {
            form = form.push(text(err).style(text::danger));
        }
        form.into()
    }

    fn tab_bar(&self) -> Element<'_, Message> {
        Tab::ALL
            .iter()
            .fold(row![].spacing(8), |bar, tab| {
                let style = if *tab == self.active_tab {
                    button::primary
                } else {
                    button::secondary
                };
                bar.push(
                    button(text(tab.label()))
                        .style(style)
                        .on_press(Message::SwitchTab(*tab)),
                )
            })
            .into()
    }

    fn library_panel(&self) -> Element<'_, Message> {
        let mut list = Column::new().spacing(8);
        if let Some(err) = &self.library.error {
            list = list.push(text(format!("Could not load your library: {err}")).style(text::danger));
        }
        if self.library.books.is_empty() {
            let hint = if self.library.loading {
                "Loading your library..."
            } else {
                "Your library is empty. Add books from the catalog or manually."
            };
            return list.push(text(hint)).into();
        }

        for book in &self.library.books {
            list = list.push(
                container(
                    row![
                        text(&book.title).width(Length::Fill),
                        text(format!("Last page: {}", book.last_page)),
                        button("Sessions")
                            .style(button::secondary)
                            .on_press(Message::OpenHistoryModal(book.id)),
                    ]
                    .spacing(12)
                    .align_y(Vertical::Center),
                )
                .padding(10)
                .style(container::rounded_box),
            );
        }
        list.into()
    }

    fn search_panel(&self) -> Element<'_, Message> {
        let search_bar = row![
            text_input("Title, author or ISBN", &self.catalog.query)
                .on_input(Message::SearchQueryChanged)
                .on_submit(Message::SearchSubmit),
            button("Search").on_press(Message::SearchSubmit),
        ]
        .spacing(8);

        let results: Element<'_, Message> = match &self.catalog.status {
            SearchStatus::Idle => text("").into(),
            SearchStatus::Loading => text("Searching...").into(),
            SearchStatus::NotFound => text("No books found.").into(),
            SearchStatus::Failed(err) => text(format!("Search failed: {err}"))
                .style(text::danger)
                .into(),
            SearchStatus::Results(books) => books
                .iter()
                .fold(Column::new().spacing(10), |cards, book| {
                    cards.push(self.catalog_card(book))
                })
                .into(),
        };

        column![search_bar, results].spacing(12).into()
    }

    fn catalog_card<'a>(&'a self, book: &'a CatalogBook) -> Element<'a, Message> {
        let cover: Element<'a, Message> = match book.cover().and_then(|url| self.covers.get(url)) {
            Some(CoverState::Ready(handle)) => image(handle.clone())
                .width(Length::Fixed(COVER_WIDTH))
                .height(Length::Fixed(COVER_HEIGHT))
                .into(),
            Some(CoverState::Loading) => cover_placeholder("Loading..."),
            _ => cover_placeholder("No cover"),
        };

        let author = if book.author.trim().is_empty() {
            "Unknown author"
        } else {
            book.author.as_str()
        };
        let mut details = column![
            text(&book.title).size(18),
            text(author),
            text(format!("{} pages", book.page_count)),
        ]
        .spacing(4)
        .width(Length::Fill);
        if let Some(description) = book.description.as_deref().filter(|d| !d.trim().is_empty()) {
            details = details.push(text(preview(description)).size(13));
        }

        let add = button("Add").on_press_maybe(
            self.catalog
                .adding
                .is_none()
                .then(|| Message::AddFromCatalog(book.clone())),
        );

        container(
            row![cover, details, add]
                .spacing(12)
                .align_y(Vertical::Center),
        )
        .padding(10)
        .style(container::rounded_box)
        .into()
    }

    fn manual_panel(&self) -> Element<'_, Message> {
        let input = &self.manual.input;
        let field = |label, value, which: ManualField| {
            labeled_input(
                label,
                value,
                move |value| Message::ManualFieldChanged(which, value),
                Message::ManualSubmit,
            )
        };

        column![
            field("Title *", &input.title, ManualField::Title),
            field("Author", &input.author, ManualField::Author),
            field("ISBN", &input.isbn, ManualField::Isbn),
            field("Page count *", &input.page_count, ManualField::PageCount),
            button(if self.manual.submitting {
                "Adding..."
            } else {
                "Add book"
            })
            .on_press_maybe((!self.manual.submitting).then_some(Message::ManualSubmit)),
        ]
        .spacing(12)
        .max_width(520.0)
        .into()
    }

    fn reading_log_panel(&self) -> Element<'_, Message> {
        let input = &self.reading_log.input;
        let selected = input
            .book_id
            .and_then(|id| self.library.find(id))
            .cloned();
        let field = |label, value, which: LogField| {
            labeled_input(
                label,
                value,
                move |value| Message::LogFieldChanged(which, value),
                Message::LogSubmit,
            )
        };

        column![
            column![
                text("Book"),
                pick_list(
                    self.library.books.as_slice(),
                    selected,
                    Message::LogBookSelected
                )
                .placeholder("Select a book"),
            ]
            .spacing(4),
            field("Date (YYYY-MM-DD)", &input.date, LogField::Date),
            row![
                field("Start page", &input.start_page, LogField::StartPage),
                field("End page", &input.end_page, LogField::EndPage),
            ]
            .spacing(12),
            button(if self.reading_log.submitting {
                "Saving..."
            } else {
                "Log reading"
            })
            .on_press_maybe((!self.reading_log.submitting).then_some(Message::LogSubmit)),
        ]
        .spacing(12)
        .max_width(520.0)
        .into()
    }

    fn stopwatch_panel(&self) -> Element<'_, Message> {
        let stopwatch = &self.timer.stopwatch;
        let selected = self
            .timer
            .selected_book
            .and_then(|id| self.library.find(id))
            .cloned();
        let last_page = self
            .timer
            .last_page
            .map(|page| format!("Last page read: {page}"))
            .unwrap_or_else(|| "Select a book to see where you stopped.".to_string());

        let start_or_pause = match stopwatch.phase() {
            StopwatchPhase::Running => button("Pause").on_press(Message::PauseStopwatch),
            StopwatchPhase::Paused => button("Resume")
                .on_press_maybe((!self.timer.saving).then_some(Message::StartStopwatch)),
            StopwatchPhase::Idle => button("Start")
                .on_press_maybe((!self.timer.saving).then_some(Message::StartStopwatch)),
        };
        let controls = row![
            start_or_pause,
            button("Reset")
                .style(button::secondary)
                .on_press_maybe((!self.timer.saving).then_some(Message::ResetStopwatch)),
        ]
        .spacing(8);

        let save = row![
            text_input("End page", &self.timer.end_page)
                .on_input(Message::EndPageChanged)
                .on_submit(Message::SaveSession)
                .width(Length::Fixed(140.0)),
            button(if self.timer.saving {
                "Saving..."
            } else {
                "Save session"
            })
            .style(button::success)
            .on_press_maybe((!self.timer.saving).then_some(Message::SaveSession)),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        let mut panel = column![
            pick_list(
                self.library.books.as_slice(),
                selected,
                Message::TimerBookSelected
            )
            .placeholder("Select a book"),
            text(last_page),
            text(stopwatch.display()).size(56),
            text(stopwatch.status_label()),
            controls,
            save,
        ]
        .spacing(12);

        if let Some(history) = &self.timer.history {
            panel = panel.push(text(format!("Sessions of {}", history.title)).size(20));
            panel = panel.push(history_table(history));
        }
        panel.into()
    }

    fn history_modal_card<'a>(&'a self, history: &'a HistoryView) -> Element<'a, Message> {
        container(
            column![
                row![
                    text(format!("Sessions of {}", history.title)).size(20),
                    horizontal_space(),
                    button("Close")
                        .style(button::secondary)
                        .on_press(Message::CloseModal),
                ]
                .align_y(Vertical::Center),
                scrollable(history_table(history)).height(Length::Shrink),
            ]
            .spacing(12),
        )
        .width(Length::Fixed(620.0))
        .max_height(520.0)
        .padding(20)
        .style(container::rounded_box)
        .into()
    }
}

fn history_table(history: &HistoryView) -> Element<'_, Message> {
    match &history.status {
        HistoryStatus::Loading => text("Loading sessions...").into(),
        HistoryStatus::Empty => text("No sessions recorded yet.").into(),
        HistoryStatus::Failed(err) => text(format!("Could not load the sessions: {err}"))
            .style(text::danger)
            .into(),
        HistoryStatus::Loaded(sessions) => {
            let header = row![
                text("Started").width(Length::FillPortion(2)),
                text("Duration").width(Length::FillPortion(1)),
                text("Pages").width(Length::FillPortion(2)),
            ]
            .spacing(8);
            sessions
                .iter()
                .fold(column![header].spacing(6), |table, session| {
                    table.push(
                        row![
                            text(&session.started_at).width(Length::FillPortion(2)),
                            text(session.duration_label()).width(Length::FillPortion(1)),
                            text(session.page_range_label()).width(Length::FillPortion(2)),
                        ]
                        .spacing(8),
                    )
                })
                .into()
        }
    }
}

fn labeled_input<'a>(
    label: &'static str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Column<'a, Message> {
    column![
        text(label),
        text_input(label, value)
            .on_input(on_input)
            .on_submit(on_submit),
    ]
    .spacing(4)
}

fn notice_card(notice: &Notice) -> Element<'_, Message> {
    let heading = match notice.kind {
        NoticeKind::Info => text("Notice").size(20),
        NoticeKind::Error => text("Something went wrong").size(20).style(text::danger),
    };
    container(
        column![
            heading,
            text(&notice.text),
            row![horizontal_space(), button("OK").on_press(Message::DismissNotice)],
        ]
        .spacing(14),
    )
    .width(Length::Fixed(420.0))
    .padding(20)
    .style(container::rounded_box)
    .into()
}

fn cover_placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    center(text(label).size(12))
        .width(Length::Fixed(COVER_WIDTH))
        .height(Length::Fixed(COVER_HEIGHT))
        .style(container::bordered_box)
        .into()
}

fn preview(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}

/// Layers `content` over `base` on a dimmed backdrop; clicks on the backdrop emit `on_blur`.
fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.6,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn long_descriptions_are_shortened() {
        let long = "word ".repeat(100);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert!(shown.chars().count() <= super::DESCRIPTION_PREVIEW_CHARS + 3);
        assert_eq!(preview("  short  "), "short");
    }
}
