//! Movie list rows and the detail section

use iced::widget::{button, column, container, image, keyed_column, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use super::theme::{self, DarkTheme};
use crate::backend::types::Movie;

/// Clickable list of movies, keyed by id so rows keep identity across renders
pub fn list<'a, Message: Clone + 'a>(
    movies: &'a [Movie],
    on_open: impl Fn(u64) -> Message + 'a,
) -> Element<'a, Message> {
    keyed_column(
        movies
            .iter()
            .map(|movie| (movie.id, item(movie, on_open(movie.id)))),
    )
    .spacing(4)
    .into()
}

fn item<'a, Message: Clone + 'a>(movie: &'a Movie, on_press: Message) -> Element<'a, Message> {
    let content = column![
        text(&movie.title).size(16).color(DarkTheme::TEXT),
        text(movie.summary()).size(12).color(DarkTheme::TEXT_MUTED),
    ]
    .spacing(2);

    button(content)
        .on_press(on_press)
        .padding(Padding::from([10.0, 12.0]))
        .width(Length::Fill)
        .style(button::text)
        .into()
}

/// Poster, headline facts and description
pub fn detail<'a, Message: 'a>(
    movie: &'a Movie,
    poster: Option<&image::Handle>,
) -> Element<'a, Message> {
    let poster: Element<'a, Message> = match poster {
        Some(handle) => image(handle.clone()).width(233).height(350).into(),
        None => Space::new(233, 350).into(),
    };

    let info = column![
        text(&movie.title).size(26).color(DarkTheme::TEXT),
        text(movie.summary()).size(14).color(DarkTheme::TEXT_MUTED),
        text(&movie.company).size(14).color(DarkTheme::TEXT_MUTED),
        Space::with_height(12),
        text(&movie.sub_title).size(16).color(DarkTheme::TEXT),
        text(&movie.description).size(14).color(DarkTheme::TEXT),
    ]
    .spacing(6);

    container(row![poster, info].spacing(20).align_y(Alignment::Start))
        .padding(16)
        .width(Length::Fill)
        .style(theme::surface)
        .into()
}
