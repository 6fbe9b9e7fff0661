//! Review editor and review list

use iced::widget::{button, column, container, keyed_column, row, text, text_input, Space};
use iced::{Element, Length, Padding};

use super::theme::{self, DarkTheme};
use crate::backend::types::Review;
use crate::catalog::ReviewEditor;

pub fn editor<'a, Message: Clone + 'a>(
    state: &'a ReviewEditor,
    on_author: impl Fn(String) -> Message + 'a,
    on_content: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    let mut author = text_input("Author", &state.author).padding(10).style(theme::field);
    let mut content = text_input("Write a review...", &state.content)
        .padding(10)
        .style(theme::field);
    if !state.is_pending() {
        author = author.on_input(on_author);
        content = content.on_input(on_content).on_submit(on_submit.clone());
    }

    let label = if state.is_pending() { "Saving..." } else { "Post" };
    let submit = button(text(label).size(14))
        .on_press_maybe((!state.is_pending()).then_some(on_submit))
        .padding(Padding::from([8.0, 16.0]))
        .style(button::primary);

    let mut form = column![content, row![author, submit].spacing(8)].spacing(8);
    if let Some(message) = state.error() {
        form = form.push(text(message).size(13).color(DarkTheme::ERROR));
    }

    container(form)
        .padding(12)
        .width(Length::Fill)
        .style(theme::surface)
        .into()
}

pub fn list<'a, Message: 'a>(reviews: &'a [Review]) -> Element<'a, Message> {
    if reviews.is_empty() {
        return text("No reviews yet.")
            .size(14)
            .color(DarkTheme::TEXT_MUTED)
            .into();
    }

    keyed_column(reviews.iter().map(|review| (review.id, item(review))))
        .spacing(12)
        .into()
}

fn item<'a, Message: 'a>(review: &'a Review) -> Element<'a, Message> {
    column![
        row![
            text(&review.author).size(14).color(DarkTheme::TEXT),
            Space::with_width(Length::Fill),
            text(review.created_date()).size(12).color(DarkTheme::TEXT_MUTED),
        ],
        text(&review.content).size(14).color(DarkTheme::TEXT),
    ]
    .spacing(4)
    .into()
}
