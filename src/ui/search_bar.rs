//! Search bar widget

use iced::widget::{button, container, row, text, text_input};
use iced::{Alignment, Element, Length, Padding};

use super::theme;

pub const SEARCH_INPUT_ID: &str = "search-input";

/// Search field plus button; both confirm with `on_submit`
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    let input = text_input("Search for a movie...", value)
        .id(text_input::Id::new(SEARCH_INPUT_ID))
        .on_input(on_input)
        .on_submit(on_submit.clone())
        .padding(Padding::new(12.0))
        .size(18)
        .style(theme::field);

    let search_button = button(text("Search").size(16))
        .on_press(on_submit)
        .padding(Padding::from([10.0, 18.0]))
        .style(button::primary);

    container(
        row![input, search_button]
            .spacing(8)
            .align_y(Alignment::Center),
    )
    .padding(Padding::from([4.0, 8.0]))
    .width(Length::Fill)
    .style(theme::surface)
    .into()
}
