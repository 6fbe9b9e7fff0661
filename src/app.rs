//! Core application state and Iced Application implementation
//!
//! Every route change, whether from a submitted search, a clicked movie or
//! back/forward, goes through [`Cinema::route_changed`], which re-syncs the
//! search draft and starts whatever the new page needs.

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Alignment, Element, Event, Length, Padding, Subscription, Task, Theme};

use crate::backend::api::{CatalogClient, FetchError};
use crate::backend::types::{Movie, Review};
use crate::catalog::{
    DetailCache, DetailState, ReviewEditor, ReviewsState, MOVIE_ERROR_MESSAGE,
    REVIEWS_ERROR_MESSAGE,
};
use crate::config::Config;
use crate::history::{History, NavigationPort, Route};
use crate::search::{
    FetchOutcome, FetchPlan, FetchTicket, QueryStateSync, ResultFetcher, SearchNavigator,
    Submission,
};
use crate::ui::{self, theme::DarkTheme};

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum SearchView {
    Loading,
    Done(FetchOutcome),
}

#[derive(Debug, Clone, PartialEq)]
enum CatalogList {
    Loading,
    Loaded(Vec<Movie>),
    Failed,
}

// ============================================================================
// Application State
// ============================================================================

pub struct Cinema {
    client: CatalogClient,
    navigator: SearchNavigator<History>,
    sync: QueryStateSync,
    fetcher: ResultFetcher,
    search: SearchView,
    catalog: CatalogList,
    details: DetailCache,
    detail: DetailState,
    poster: Option<image::Handle>,
    reviews: ReviewsState,
    /// Tag of the latest review list request; older answers are dropped
    reviews_seq: u64,
    editor: ReviewEditor,
}

#[derive(Debug, Clone)]
pub enum Message {
    DraftChanged(String),
    SubmitSearch,
    SearchResolved(FetchTicket, Result<Vec<Movie>, FetchError>),
    CatalogLoaded(Result<Vec<Movie>, FetchError>),
    GoHome,
    OpenMovie(u64),
    Back,
    Forward,
    MovieLoaded(u64, Result<Movie, FetchError>),
    PosterLoaded(u64, Result<Vec<u8>, FetchError>),
    ReviewsLoaded(u64, u64, Result<Vec<Review>, FetchError>),
    ReviewAuthorChanged(String),
    ReviewContentChanged(String),
    SubmitReview,
    ReviewSubmitted(u64, u64, Result<(), FetchError>),
    IcedEvent(Event),
}

impl Cinema {
    /// Build the app, optionally starting at a route path like `/movie/3`
    pub fn new(config: Config, start_path: Option<&str>) -> (Self, Task<Message>) {
        let client = CatalogClient::new(&config.api_url);
        tracing::info!("Using catalog API at {}", client.base_url());

        let history = History::default();
        let mut app = Self {
            client: client.clone(),
            sync: QueryStateSync::new(history.current().query()),
            navigator: SearchNavigator::new(history),
            fetcher: ResultFetcher::new(),
            search: SearchView::Done(FetchOutcome::EmptyQuery),
            catalog: CatalogList::Loading,
            details: DetailCache::default(),
            detail: DetailState::Loading,
            poster: None,
            reviews: ReviewsState::Loading,
            reviews_seq: 0,
            editor: ReviewEditor::default(),
        };

        let load_catalog = Task::perform(
            async move { client.all_movies().await },
            Message::CatalogLoaded,
        );

        let open_start = match start_path.map(|path| app.navigator.port_mut().push_path(path)) {
            Some(Ok(())) => app.route_changed(),
            Some(Err(e)) => {
                tracing::warn!("Ignoring start path: {}", e);
                Task::none()
            }
            None => Task::none(),
        };

        (app, Task::batch([load_catalog, open_start]))
    }

    pub fn title(&self) -> String {
        let movie_title = match &self.detail {
            DetailState::Loaded(movie) => Some(movie.title.as_str()),
            _ => None,
        };
        self.route().title(movie_title)
    }

    fn route(&self) -> &Route {
        self.navigator.port().current()
    }

    fn current_movie(&self) -> Option<u64> {
        match self.route() {
            Route::Movie { id } => Some(*id),
            _ => None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DraftChanged(value) => {
                self.sync.on_input(value);
                Task::none()
            }

            Message::SubmitSearch => match self.navigator.submit(self.sync.draft()) {
                Ok(Submission::Navigated(query)) => {
                    tracing::info!("Searching for {:?}", query);
                    self.route_changed()
                }
                Ok(Submission::Skipped) => Task::none(),
                Err(e) => {
                    tracing::error!("Search navigation failed: {}", e);
                    Task::none()
                }
            },

            Message::SearchResolved(ticket, result) => {
                if let Some(outcome) = self.fetcher.resolve(ticket, result) {
                    self.search = SearchView::Done(outcome);
                }
                Task::none()
            }

            Message::CatalogLoaded(result) => {
                match result {
                    Ok(movies) => {
                        tracing::info!("Catalog loaded: {} movies", movies.len());
                        self.navigator
                            .port_mut()
                            .set_known_movies(movies.iter().map(|m| m.id));
                        self.details.extend(&movies);
                        self.catalog = CatalogList::Loaded(movies);
                    }
                    Err(e) => {
                        // Without the id list no movie page can be opened.
                        tracing::error!("Failed to load the movie catalog: {}", e);
                        self.navigator.port_mut().set_known_movies(std::iter::empty());
                        self.catalog = CatalogList::Failed;
                    }
                }
                Task::none()
            }

            Message::GoHome => self.navigate(Route::Home),

            Message::OpenMovie(id) => self.navigate(Route::Movie { id }),

            Message::Back => {
                if self.navigator.port_mut().back().is_some() {
                    self.route_changed()
                } else {
                    Task::none()
                }
            }

            Message::Forward => {
                if self.navigator.port_mut().forward().is_some() {
                    self.route_changed()
                } else {
                    Task::none()
                }
            }

            Message::MovieLoaded(id, result) => {
                if let Ok(movie) = &result {
                    self.details.insert(movie.clone());
                }
                if self.current_movie() != Some(id) {
                    return Task::none();
                }
                self.detail = DetailState::from(result);
                self.load_poster()
            }

            Message::PosterLoaded(id, result) => {
                if self.current_movie() == Some(id) {
                    match result {
                        Ok(bytes) => self.poster = Some(image::Handle::from_bytes(bytes)),
                        Err(e) => tracing::warn!("Poster for movie {} unavailable: {}", id, e),
                    }
                }
                Task::none()
            }

            Message::ReviewsLoaded(id, seq, result) => {
                if seq == self.reviews_seq && self.current_movie() == Some(id) {
                    self.reviews = ReviewsState::from(result);
                }
                Task::none()
            }

            Message::ReviewAuthorChanged(value) => {
                self.editor.author = value;
                Task::none()
            }

            Message::ReviewContentChanged(value) => {
                self.editor.content = value;
                Task::none()
            }

            Message::SubmitReview => {
                let Some(id) = self.current_movie() else {
                    return Task::none();
                };
                let Some((generation, review)) = self.editor.begin_submit(id) else {
                    return Task::none();
                };
                let client = self.client.clone();
                Task::perform(
                    async move { client.create_review(&review).await },
                    move |result| Message::ReviewSubmitted(id, generation, result),
                )
            }

            Message::ReviewSubmitted(id, generation, result) => {
                if self.current_movie() != Some(id) {
                    return Task::none();
                }
                if self.editor.finish_submit(generation, result) {
                    tracing::info!("Review saved for movie {}", id);
                    self.load_reviews(id)
                } else {
                    Task::none()
                }
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event {
                    if modifiers.alt() {
                        match key {
                            Key::Named(Named::ArrowLeft) => return self.update(Message::Back),
                            Key::Named(Named::ArrowRight) => return self.update(Message::Forward),
                            _ => {}
                        }
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let page: Element<'_, Message> = match self.route() {
            Route::Home => column![self.view_search_bar(), self.view_catalog()]
                .spacing(16)
                .into(),
            Route::Search { .. } => column![self.view_search_bar(), self.view_results()]
                .spacing(16)
                .into(),
            Route::Movie { .. } => self.view_movie(),
        };

        container(
            column![
                self.view_header(),
                scrollable(container(page).padding(Padding::from([0.0, 4.0])))
                    .height(Length::Fill)
            ]
            .spacing(16),
        )
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(ui::theme::page)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    fn navigate(&mut self, route: Route) -> Task<Message> {
        if self.route() == &route {
            return Task::none();
        }
        match self.navigator.port_mut().push(route) {
            Ok(()) => self.route_changed(),
            Err(e) => {
                tracing::warn!("Navigation refused: {}", e);
                Task::none()
            }
        }
    }

    /// React to the current route having changed
    fn route_changed(&mut self) -> Task<Message> {
        let route = self.route().clone();
        self.sync.on_external_query_change(route.query());

        match route {
            Route::Home => Task::none(),
            Route::Search { q } => self.start_search(&q),
            Route::Movie { id } => self.open_movie(id),
        }
    }

    fn start_search(&mut self, query: &str) -> Task<Message> {
        match self.fetcher.begin(query) {
            FetchPlan::Ready(outcome) => {
                self.search = SearchView::Done(outcome);
                Task::none()
            }
            FetchPlan::Request(ticket) => {
                self.search = SearchView::Loading;
                let client = self.client.clone();
                Task::perform(
                    async move {
                        let result = client.search_movies(ticket.query()).await;
                        (ticket, result)
                    },
                    |(ticket, result)| Message::SearchResolved(ticket, result),
                )
            }
        }
    }

    fn open_movie(&mut self, id: u64) -> Task<Message> {
        self.poster = None;
        self.editor.reset();
        self.reviews = ReviewsState::Loading;

        let detail = match self.details.get(id) {
            Some(movie) => {
                self.detail = DetailState::Loaded(movie.clone());
                self.load_poster()
            }
            None => {
                self.detail = DetailState::Loading;
                let client = self.client.clone();
                Task::perform(
                    async move { client.movie(id).await },
                    move |result| Message::MovieLoaded(id, result),
                )
            }
        };

        Task::batch([detail, self.load_reviews(id)])
    }

    fn load_poster(&self) -> Task<Message> {
        let DetailState::Loaded(movie) = &self.detail else {
            return Task::none();
        };
        if movie.poster_img_url.is_empty() {
            return Task::none();
        }
        let id = movie.id;
        let url = movie.poster_img_url.clone();
        let client = self.client.clone();
        Task::perform(
            async move { client.image_bytes(&url).await },
            move |result| Message::PosterLoaded(id, result),
        )
    }

    fn load_reviews(&mut self, id: u64) -> Task<Message> {
        self.reviews_seq += 1;
        let seq = self.reviews_seq;
        let client = self.client.clone();
        Task::perform(
            async move { client.reviews(id).await },
            move |result| Message::ReviewsLoaded(id, seq, result),
        )
    }

    // ========================================================================
    // Views
    // ========================================================================

    fn view_header(&self) -> Element<'_, Message> {
        let history = self.navigator.port();
        row![
            button(text("◀").size(14))
                .on_press_maybe(history.can_go_back().then_some(Message::Back))
                .style(button::text),
            button(text("▶").size(14))
                .on_press_maybe(history.can_go_forward().then_some(Message::Forward))
                .style(button::text),
            button(text("Hanip Cinema").size(20).color(DarkTheme::PRIMARY))
                .on_press(Message::GoHome)
                .style(button::text),
        ]
        .spacing(4)
        .align_y(Alignment::Center)
        .into()
    }

    fn view_search_bar(&self) -> Element<'_, Message> {
        ui::search_bar::view(self.sync.draft(), Message::DraftChanged, Message::SubmitSearch)
    }

    fn view_catalog(&self) -> Element<'_, Message> {
        match &self.catalog {
            CatalogList::Loading => muted("Loading movies..."),
            CatalogList::Failed => error("Something went wrong while loading movies..."),
            CatalogList::Loaded(movies) => column![
                text("All movies").size(18).color(DarkTheme::TEXT),
                ui::movie_item::list(movies, Message::OpenMovie),
            ]
            .spacing(8)
            .into(),
        }
    }

    fn view_results(&self) -> Element<'_, Message> {
        match &self.search {
            SearchView::Loading => muted("Searching..."),
            SearchView::Done(outcome) => match outcome.error_message() {
                Some(message) => error(message),
                None => ui::movie_item::list(outcome.items(), Message::OpenMovie),
            },
        }
    }

    fn view_movie(&self) -> Element<'_, Message> {
        let detail: Element<'_, Message> = match &self.detail {
            DetailState::Loading => muted("Loading movie..."),
            DetailState::NotFound => error("Movie not found."),
            DetailState::Failed => error(MOVIE_ERROR_MESSAGE),
            DetailState::Loaded(movie) => ui::movie_item::detail(movie, self.poster.as_ref()),
        };

        let reviews: Element<'_, Message> = match &self.reviews {
            ReviewsState::Loading => muted("Loading reviews..."),
            ReviewsState::Failed => error(REVIEWS_ERROR_MESSAGE),
            ReviewsState::Loaded(reviews) => ui::review::list(reviews),
        };

        column![
            detail,
            ui::review::editor(
                &self.editor,
                Message::ReviewAuthorChanged,
                Message::ReviewContentChanged,
                Message::SubmitReview,
            ),
            Space::with_height(8),
            reviews,
        ]
        .spacing(16)
        .into()
    }
}

fn muted<'a>(message: &'a str) -> Element<'a, Message> {
    text(message).size(14).color(DarkTheme::TEXT_MUTED).into()
}

fn error<'a>(message: &'a str) -> Element<'a, Message> {
    text(message).size(14).color(DarkTheme::ERROR).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app() -> Cinema {
        // Nothing is awaited in these tests; the address is never contacted.
        let (app, _) = Cinema::new(Config::default(), None);
        app
    }

    fn movie(id: u64, title: &str) -> Movie {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    fn review(movie_id: u64, content: &str) -> Review {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "movieId": movie_id,
            "author": "kim",
            "content": content,
            "createdAt": "2024-03-07T09:00:00Z",
        }))
        .unwrap()
    }

    /// Submit `query` and return a ticket that is current for it.
    ///
    /// The task holding the app's own ticket is dropped unrun, so the request
    /// is reissued the same way `start_search` does.
    fn submit(app: &mut Cinema, query: &str) -> FetchTicket {
        let _ = app.update(Message::DraftChanged(query.to_string()));
        let _ = app.update(Message::SubmitSearch);
        match app.fetcher.begin(query) {
            FetchPlan::Request(ticket) => ticket,
            FetchPlan::Ready(outcome) => panic!("expected a request, got {:?}", outcome),
        }
    }

    #[test]
    fn test_submit_navigates_and_starts_loading() {
        let mut app = app();
        let _ = app.update(Message::DraftChanged("matrix".to_string()));
        let _ = app.update(Message::SubmitSearch);

        assert_eq!(app.route(), &Route::search("matrix"));
        assert_eq!(app.search, SearchView::Loading);
        assert_eq!(app.title(), "Search results: matrix | Hanip Cinema");
    }

    #[test]
    fn test_start_path_opens_search() {
        let (app, _) = Cinema::new(Config::default(), Some("/search?q=heat"));
        assert_eq!(app.route(), &Route::search("heat"));
        assert_eq!(app.sync.draft(), "heat");
        assert_eq!(app.search, SearchView::Loading);
    }

    #[test]
    fn test_bad_start_path_stays_home() {
        let (app, _) = Cinema::new(Config::default(), Some("/nowhere"));
        assert_eq!(app.route(), &Route::Home);
    }

    #[test]
    fn test_blank_submit_stays_home() {
        let mut app = app();
        let _ = app.update(Message::DraftChanged("  ".to_string()));
        let _ = app.update(Message::SubmitSearch);
        assert_eq!(app.route(), &Route::Home);
    }

    #[test]
    fn test_back_restores_previous_query_into_draft() {
        let mut app = app();
        let _ = app.update(Message::DraftChanged("alien".to_string()));
        let _ = app.update(Message::SubmitSearch);
        let _ = app.update(Message::DraftChanged("blade".to_string()));
        let _ = app.update(Message::SubmitSearch);
        let _ = app.update(Message::DraftChanged("half typed".to_string()));

        let _ = app.update(Message::Back);
        assert_eq!(app.route(), &Route::search("alien"));
        assert_eq!(app.sync.draft(), "alien");

        let _ = app.update(Message::Back);
        assert_eq!(app.sync.draft(), "");
    }

    #[test]
    fn test_late_result_for_old_query_not_shown() {
        let mut app = app();
        let alien = submit(&mut app, "alien");
        let blade = submit(&mut app, "blade");

        let _ = app.update(Message::SearchResolved(blade, Ok(vec![movie(2, "Blade")])));
        let _ = app.update(Message::SearchResolved(alien, Ok(vec![movie(1, "Alien")])));

        assert_eq!(
            app.search,
            SearchView::Done(FetchOutcome::Success(vec![movie(2, "Blade")]))
        );
    }

    #[test]
    fn test_unknown_movie_stays_on_page() {
        let mut app = app();
        let _ = app.update(Message::CatalogLoaded(Ok(vec![movie(1, "Heat")])));

        let _ = app.update(Message::OpenMovie(9));
        assert_eq!(app.route(), &Route::Home);

        let _ = app.update(Message::OpenMovie(1));
        assert_eq!(app.route(), &Route::Movie { id: 1 });
        assert_eq!(app.detail, DetailState::Loaded(movie(1, "Heat")));
        assert_eq!(app.title(), "Heat | Hanip Cinema");
    }

    #[test]
    fn test_movie_result_for_other_page_ignored() {
        let mut app = app();
        let _ = app.update(Message::OpenMovie(1));
        let _ = app.update(Message::OpenMovie(2));

        let _ = app.update(Message::MovieLoaded(1, Ok(movie(1, "Heat"))));
        assert_eq!(app.detail, DetailState::Loading);

        let _ = app.update(Message::MovieLoaded(2, Err(FetchError::NotFound)));
        assert_eq!(app.detail, DetailState::NotFound);
    }

    #[test]
    fn test_review_submitted_reloads_list() {
        let mut app = app();
        let _ = app.update(Message::OpenMovie(3));
        let _ = app.update(Message::ReviewAuthorChanged("kim".to_string()));
        let _ = app.update(Message::ReviewContentChanged("Tense".to_string()));
        let _ = app.update(Message::SubmitReview);
        assert!(app.editor.is_pending());

        let _ = app.update(Message::ReviewSubmitted(3, app.editor.generation, Ok(())));
        assert!(!app.editor.is_pending());
        assert!(app.editor.content.is_empty());
    }

    #[test]
    fn test_review_answer_from_earlier_visit_ignored() {
        let mut app = app();
        let _ = app.update(Message::OpenMovie(3));
        let _ = app.update(Message::ReviewAuthorChanged("kim".to_string()));
        let _ = app.update(Message::ReviewContentChanged("first".to_string()));
        let _ = app.update(Message::SubmitReview);
        let first = app.editor.generation;

        let _ = app.update(Message::GoHome);
        let _ = app.update(Message::OpenMovie(3));
        let _ = app.update(Message::ReviewAuthorChanged("kim".to_string()));
        let _ = app.update(Message::ReviewContentChanged("second, unsent".to_string()));

        let _ = app.update(Message::ReviewSubmitted(
            3,
            first,
            Err(FetchError::Status(500)),
        ));
        assert_eq!(app.editor.error(), None);

        let _ = app.update(Message::ReviewSubmitted(3, first, Ok(())));
        assert_eq!(app.editor.content, "second, unsent");
        assert_eq!(app.editor.author, "kim");
        assert!(!app.editor.is_pending());
    }

    #[test]
    fn test_older_review_list_not_shown() {
        let mut app = app();
        let _ = app.update(Message::OpenMovie(3));
        let opened = app.reviews_seq;
        let _ = app.update(Message::ReviewAuthorChanged("kim".to_string()));
        let _ = app.update(Message::ReviewContentChanged("Tense".to_string()));
        let _ = app.update(Message::SubmitReview);
        let _ = app.update(Message::ReviewSubmitted(3, app.editor.generation, Ok(())));
        let reloaded = app.reviews_seq;
        assert_ne!(opened, reloaded);

        let fresh = vec![review(3, "Tense")];
        let _ = app.update(Message::ReviewsLoaded(3, reloaded, Ok(fresh.clone())));
        let _ = app.update(Message::ReviewsLoaded(3, opened, Ok(Vec::new())));

        assert_eq!(app.reviews, ReviewsState::Loaded(fresh));
    }

    #[test]
    fn test_failed_catalog_refuses_movie_pages() {
        let mut app = app();
        let _ = app.update(Message::CatalogLoaded(Err(FetchError::Status(503))));

        let _ = app.update(Message::OpenMovie(1));
        assert_eq!(app.route(), &Route::Home);
        assert_eq!(app.catalog, CatalogList::Failed);
    }
}
