//! The conversation controller.
//!
//! Every user message and button press lands here. The controller resolves
//! the user's session state, calls the right collaborator, runs the result
//! through a formatter and the chunker, and emits chat messages through the
//! transport. Collaborator failures become user-visible "try again"
//! messages; they never take the process down.

use std::sync::Arc;

use crate::callback::CallbackAction;
use crate::chunk::{self, ChatChunk};
use crate::collaborators::{GenreListing, MetadataProvider, VideoSearch};
use crate::error::Result;
use crate::format;
use crate::genres;
use crate::listing;
use crate::markup;
use crate::model::MovieDetail;
use crate::session::{SessionState, SessionStore};
use crate::transport::{
    CallbackRef, ChatRef, ChatTransport, Control, MessageRef, ReplyMarkup, UserId,
};

/// Title-search candidates shown as selection buttons.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// User-facing texts and button labels.
pub mod texts {
    use crate::markup;

    pub const START_COMMAND: &str = "/start";
    pub const FIND_MOVIE: &str = "Find a movie";
    pub const PICK_MOVIE: &str = "Pick a movie";
    pub const CANCEL_LABEL: &str = "❌ Cancel";
    pub const YES_LABEL: &str = "☑️ Yes";
    pub const NO_LABEL: &str = "❌ No";

    pub const GREETING: &str = "Hi! This is Reelbot and it will help you search for the right \
        information on movies you're interested in or pick up movies you want to watch!\n\
        To get information about a movie, click on 'Find a movie' and follow the instructions. \
        In addition to basic movie information, you can also see cast, synopsis, and trailers \
        of the movie.\nTo find a new movie, click on 'Pick a movie' and select the genre you're \
        interested in. The bot will do the rest!\nWe hope you like it!";

    pub const TITLE_PROMPT: &str =
        "Please enter the name of the movie, or click the button to cancel the request.";
    pub const CHOOSE_MOVIE: &str = "Please choose which movie you are interested in.\n\
        If your movie is not on the list, please click Cancel and try searching again, \
        specifying the title.";
    pub const NO_RESULTS: &str = "No movies were found for this query.";
    pub const SELECT_FUNCTION: &str = "Select the desired function:";
    pub const GENRE_PROMPT: &str = "Select the genre you are interested in by scrolling \
        through the pages, or click Cancel to cancel your search.";
    pub const SYNOPSIS_DECLINED: &str = "OK! The synopsis won't be shown.";
    pub const CANCELING: &str = "Canceling...";
    pub const PICK_FAILED: &str =
        "Sorry, picking a movie didn't work out this time. Please try again.";
    pub const TRY_AGAIN: &str =
        "Something went wrong while fetching movie data. Please try again.";

    pub fn spoiler_warning() -> String {
        format!(
            "{}\nAre you sure you want to see it?",
            markup::bold("Spoilers! The synopsis below may give away important plot points.")
        )
    }
}

/// A user message as delivered by the transport adapter.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat: ChatRef,
    pub user: UserId,
    pub message: MessageRef,
    pub text: String,
}

/// A button press as delivered by the transport adapter.
///
/// The payload is parsed into an action at the transport boundary; `None`
/// means the payload wasn't one of ours.
#[derive(Debug, Clone)]
pub struct IncomingCallback {
    pub user: UserId,
    pub message: MessageRef,
    pub callback: CallbackRef,
    pub action: Option<CallbackAction>,
}

/// Routes chat events through collaborators, formatters and the chunker.
pub struct ConversationController {
    transport: Arc<dyn ChatTransport>,
    metadata: Arc<dyn MetadataProvider>,
    listing: Arc<dyn GenreListing>,
    video: Arc<dyn VideoSearch>,
    sessions: SessionStore,
}

impl ConversationController {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        metadata: Arc<dyn MetadataProvider>,
        listing: Arc<dyn GenreListing>,
        video: Arc<dyn VideoSearch>,
    ) -> Self {
        Self {
            transport,
            metadata,
            listing,
            video,
            sessions: SessionStore::new(),
        }
    }

    /// Handles one user message. Never fails upward; errors surface to the
    /// user as a retry notice.
    pub async fn handle_message(&self, message: IncomingMessage) {
        if let Err(error) = self.dispatch_message(&message).await {
            tracing::warn!(%error, user = message.user.0, "message handling failed");
            self.send_retry_notice(message.chat).await;
        }
    }

    /// Handles one button press, acknowledging the callback either way.
    pub async fn handle_callback(&self, callback: IncomingCallback) {
        if let Err(error) = self.dispatch_callback(&callback).await {
            tracing::warn!(%error, user = callback.user.0, "callback handling failed");
            self.send_retry_notice(callback.message.chat).await;
        }
        if let Err(error) = self.transport.answer_callback(&callback.callback).await {
            tracing::debug!(%error, "callback acknowledgement failed");
        }
    }

    async fn dispatch_message(&self, message: &IncomingMessage) -> Result<()> {
        match message.text.trim() {
            texts::START_COMMAND => self.show_start(message).await,
            texts::FIND_MOVIE => self.begin_title_search(message).await,
            texts::PICK_MOVIE => self.show_genre_menu(message).await,
            _ => match self.sessions.state(message.user).await {
                SessionState::AwaitingTitle => self.run_title_search(message).await,
                SessionState::Idle => {
                    tracing::debug!(user = message.user.0, "ignoring free text outside a search");
                    Ok(())
                }
            },
        }
    }

    async fn dispatch_callback(&self, callback: &IncomingCallback) -> Result<()> {
        if self.sessions.state(callback.user).await == SessionState::AwaitingTitle {
            // While a title prompt is open, every button press cancels the
            // search, matching the original bot's catch-all registration.
            return self.cancel_search(callback).await;
        }
        match &callback.action {
            Some(CallbackAction::Movie(id)) => self.show_movie(callback.message, id).await,
            Some(CallbackAction::Genre(label)) => self.pick_by_genre(callback, label).await,
            Some(CallbackAction::Cast(id)) => self.show_cast(callback.message, id).await,
            Some(CallbackAction::Trailers(id)) => self.show_trailers(callback.message, id).await,
            Some(CallbackAction::Synopsis(id)) => {
                self.warn_about_spoilers(callback.message, id).await
            }
            Some(CallbackAction::ShowSynopsis(id)) => {
                self.show_synopsis(callback.message, id).await
            }
            Some(CallbackAction::CancelSynopsis) => self.cancel_synopsis(callback.message).await,
            Some(CallbackAction::GenresPage(page)) => {
                self.turn_genre_page(callback.message, *page).await
            }
            Some(CallbackAction::CancelSearch) => self.cancel_search(callback).await,
            None => {
                tracing::warn!(user = callback.user.0, "unrecognized callback payload");
                Ok(())
            }
        }
    }

    async fn show_start(&self, message: &IncomingMessage) -> Result<()> {
        self.transport
            .send(message.chat, texts::GREETING, Some(main_menu()))
            .await?;
        Ok(())
    }

    async fn begin_title_search(&self, message: &IncomingMessage) -> Result<()> {
        self.sessions
            .set(message.user, SessionState::AwaitingTitle)
            .await;
        let cancel = ReplyMarkup::Inline(vec![vec![Control::new(
            texts::CANCEL_LABEL,
            CallbackAction::CancelSearch,
        )]]);
        self.transport
            .reply(message.message, texts::TITLE_PROMPT, Some(cancel))
            .await?;
        Ok(())
    }

    async fn run_title_search(&self, message: &IncomingMessage) -> Result<()> {
        // Back to idle before anything can fail; a broken search must not
        // leave the prompt armed.
        self.sessions.reset(message.user).await;
        let results = self
            .metadata
            .search_titles(message.text.trim(), MAX_SEARCH_RESULTS)
            .await?;
        if results.is_empty() {
            self.transport
                .reply(message.message, texts::NO_RESULTS, Some(main_menu()))
                .await?;
            return Ok(());
        }
        let mut rows: Vec<Vec<Control>> = results
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|movie| {
                vec![Control::new(
                    movie.display_title,
                    CallbackAction::Movie(movie.id),
                )]
            })
            .collect();
        rows.push(vec![Control::new(
            texts::CANCEL_LABEL,
            CallbackAction::CancelSearch,
        )]);
        self.transport
            .reply(
                message.message,
                texts::CHOOSE_MOVIE,
                Some(ReplyMarkup::Inline(rows)),
            )
            .await?;
        Ok(())
    }

    async fn show_genre_menu(&self, message: &IncomingMessage) -> Result<()> {
        self.transport
            .reply(message.message, texts::GENRE_PROMPT, Some(genres::genre_page(0)))
            .await?;
        Ok(())
    }

    async fn show_movie(&self, origin: MessageRef, id: &str) -> Result<()> {
        let detail = self.resolved_detail(id).await?;
        let text = format::format_detail(&detail, id);
        let chunks = chunk::chunk_message(&text, Some(action_keyboard(id)));
        self.deliver_over(origin, chunks).await?;
        self.transport
            .send(origin.chat, texts::SELECT_FUNCTION, Some(main_menu()))
            .await?;
        Ok(())
    }

    async fn pick_by_genre(&self, callback: &IncomingCallback, label: &str) -> Result<()> {
        match self.random_movie_id(label).await {
            Ok(id) => self.show_movie(callback.message, &id).await,
            Err(error) => {
                tracing::warn!(%error, genre = label, "random genre pick failed");
                self.transport
                    .reply(callback.message, texts::PICK_FAILED, Some(main_menu()))
                    .await?;
                Ok(())
            }
        }
    }

    async fn random_movie_id(&self, label: &str) -> Result<String> {
        let slug = genres::slug(label);
        let start = {
            let mut rng = rand::thread_rng();
            listing::random_start_offset(&mut rng)
        };
        let html = self.listing.fetch_listing_page(&slug, start).await?;
        let mut rng = rand::thread_rng();
        listing::pick_random_id(&html, &mut rng)
    }

    async fn show_cast(&self, origin: MessageRef, id: &str) -> Result<()> {
        let cast = self.metadata.cast(id).await?;
        let text = format::format_cast(&cast, id);
        self.deliver_replies(origin, chunk::chunk_message(&text, None))
            .await
    }

    async fn show_trailers(&self, origin: MessageRef, id: &str) -> Result<()> {
        let detail = self.resolved_detail(id).await?;
        let query = format::trailer_query(detail.primary_title(), detail.year);
        let results = self
            .video
            .search(&query, format::TRAILER_RESULT_LIMIT)
            .await?;
        let text = format::format_trailers(&query, &results);
        self.deliver_replies(origin, chunk::chunk_message(&text, None))
            .await
    }

    async fn warn_about_spoilers(&self, origin: MessageRef, id: &str) -> Result<()> {
        let keyboard = ReplyMarkup::Inline(vec![
            vec![Control::new(
                texts::YES_LABEL,
                CallbackAction::ShowSynopsis(id.to_string()),
            )],
            vec![Control::new(texts::NO_LABEL, CallbackAction::CancelSynopsis)],
        ]);
        self.transport
            .reply(origin, &texts::spoiler_warning(), Some(keyboard))
            .await?;
        Ok(())
    }

    async fn show_synopsis(&self, origin: MessageRef, id: &str) -> Result<()> {
        let synopsis = self.metadata.synopsis(id).await?;
        let text = format::format_synopsis(synopsis.as_deref());
        self.deliver_over(origin, chunk::chunk_message(&text, None))
            .await
    }

    async fn cancel_synopsis(&self, origin: MessageRef) -> Result<()> {
        if self.transport.delete(origin).await.is_err() {
            self.transport
                .edit_text(origin, texts::SYNOPSIS_DECLINED, None)
                .await?;
        }
        Ok(())
    }

    async fn cancel_search(&self, callback: &IncomingCallback) -> Result<()> {
        self.sessions.reset(callback.user).await;
        let chat = callback.message.chat;
        match self.transport.delete(callback.message).await {
            Ok(()) => {
                let text = format!(
                    "{}\n{}",
                    markup::code(texts::CANCELING),
                    texts::SELECT_FUNCTION
                );
                self.transport.send(chat, &text, Some(main_menu())).await?;
            }
            Err(error) => {
                tracing::debug!(%error, "cancel target already gone, editing in place");
                self.transport
                    .edit_text(callback.message, &markup::code(texts::CANCELING), None)
                    .await?;
                self.transport
                    .send(chat, texts::SELECT_FUNCTION, Some(main_menu()))
                    .await?;
            }
        }
        Ok(())
    }

    async fn turn_genre_page(&self, origin: MessageRef, page: usize) -> Result<()> {
        if !(1..=genres::GENRE_PAGE_COUNT).contains(&page) {
            tracing::warn!(page, "genre page out of range");
            return Ok(());
        }
        self.transport
            .edit_markup(origin, genres::genre_page(page - 1))
            .await
    }

    /// Fetches the detail record and fills in the year from extended
    /// release dates when the record itself has none. A failed or fruitless
    /// fallback just leaves the year absent.
    async fn resolved_detail(&self, id: &str) -> Result<MovieDetail> {
        let mut detail = self.metadata.detail(id).await?;
        if detail.year.is_none() {
            match self.metadata.release_dates(id).await {
                Ok(dates) => detail.year = format::year_from_release_dates(&dates),
                Err(error) => {
                    tracing::debug!(%error, id, "release date fallback failed");
                }
            }
        }
        Ok(detail)
    }

    /// Delivers chunks over an existing message: the first chunk replaces
    /// its text, the rest chain as replies. Controls already sit on the
    /// final chunk.
    async fn deliver_over(&self, origin: MessageRef, chunks: Vec<ChatChunk>) -> Result<()> {
        let mut last = origin;
        for (index, chunk) in chunks.into_iter().enumerate() {
            last = if index == 0 {
                self.transport
                    .edit_text(origin, &chunk.text, chunk.controls)
                    .await?
            } else {
                self.transport
                    .reply(last, &chunk.text, chunk.controls)
                    .await?
            };
        }
        Ok(())
    }

    /// Delivers chunks as a chain of replies to `origin`.
    async fn deliver_replies(&self, origin: MessageRef, chunks: Vec<ChatChunk>) -> Result<()> {
        let mut last = origin;
        for chunk in chunks {
            last = self
                .transport
                .reply(last, &chunk.text, chunk.controls)
                .await?;
        }
        Ok(())
    }

    async fn send_retry_notice(&self, chat: ChatRef) {
        if let Err(error) = self
            .transport
            .send(chat, texts::TRY_AGAIN, Some(main_menu()))
            .await
        {
            tracing::debug!(%error, "retry notice delivery failed");
        }
    }
}

/// The persistent main menu.
fn main_menu() -> ReplyMarkup {
    ReplyMarkup::Menu(vec![
        texts::FIND_MOVIE.to_string(),
        texts::PICK_MOVIE.to_string(),
    ])
}

/// The Cast / Synopsis / Trailers buttons under a detail block.
fn action_keyboard(id: &str) -> ReplyMarkup {
    ReplyMarkup::Inline(vec![
        vec![Control::new("Cast", CallbackAction::Cast(id.to_string()))],
        vec![Control::new(
            "Synopsis",
            CallbackAction::Synopsis(id.to_string()),
        )],
        vec![Control::new(
            "Trailers",
            CallbackAction::Trailers(id.to_string()),
        )],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::BotError;
    use crate::model::{CastEntry, MovieSummary, VideoResult};

    #[derive(Debug, Clone, PartialEq)]
    enum Delivery {
        Sent {
            text: String,
            markup: Option<ReplyMarkup>,
        },
        Replied {
            to: i32,
            text: String,
            markup: Option<ReplyMarkup>,
        },
        Edited {
            id: i32,
            text: String,
            markup: Option<ReplyMarkup>,
        },
        KeyboardEdited {
            id: i32,
            markup: ReplyMarkup,
        },
        Deleted {
            id: i32,
        },
    }

    #[derive(Default)]
    struct MockTransport {
        deliveries: Mutex<Vec<Delivery>>,
        fail_delete: bool,
        counter: Mutex<i32>,
    }

    impl MockTransport {
        fn failing_deletes() -> Self {
            Self {
                fail_delete: true,
                ..Self::default()
            }
        }

        fn log(&self) -> Vec<Delivery> {
            self.deliveries.lock().unwrap().clone()
        }

        fn next_id(&self) -> i32 {
            let mut counter = self.counter.lock().unwrap();
            *counter += 1;
            100 + *counter
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn send(
            &self,
            chat: ChatRef,
            text: &str,
            markup: Option<ReplyMarkup>,
        ) -> Result<MessageRef> {
            self.deliveries.lock().unwrap().push(Delivery::Sent {
                text: text.to_string(),
                markup,
            });
            Ok(MessageRef {
                chat,
                id: self.next_id(),
            })
        }

        async fn reply(
            &self,
            to: MessageRef,
            text: &str,
            markup: Option<ReplyMarkup>,
        ) -> Result<MessageRef> {
            self.deliveries.lock().unwrap().push(Delivery::Replied {
                to: to.id,
                text: text.to_string(),
                markup,
            });
            Ok(MessageRef {
                chat: to.chat,
                id: self.next_id(),
            })
        }

        async fn edit_text(
            &self,
            message: MessageRef,
            text: &str,
            markup: Option<ReplyMarkup>,
        ) -> Result<MessageRef> {
            self.deliveries.lock().unwrap().push(Delivery::Edited {
                id: message.id,
                text: text.to_string(),
                markup,
            });
            Ok(message)
        }

        async fn edit_markup(&self, message: MessageRef, markup: ReplyMarkup) -> Result<()> {
            self.deliveries
                .lock()
                .unwrap()
                .push(Delivery::KeyboardEdited {
                    id: message.id,
                    markup,
                });
            Ok(())
        }

        async fn delete(&self, message: MessageRef) -> Result<()> {
            if self.fail_delete {
                return Err(BotError::transport("message to delete not found"));
            }
            self.deliveries
                .lock()
                .unwrap()
                .push(Delivery::Deleted { id: message.id });
            Ok(())
        }

        async fn answer_callback(&self, _callback: &CallbackRef) -> Result<()> {
            Ok(())
        }
    }

    struct MockMetadata {
        summaries: Vec<MovieSummary>,
        detail: MovieDetail,
        cast: Vec<CastEntry>,
        synopsis: Option<String>,
        release_dates: Vec<String>,
        fail_detail: bool,
        search_calls: Mutex<usize>,
        detail_calls: Mutex<usize>,
        synopsis_calls: Mutex<usize>,
    }

    impl MockMetadata {
        fn inception() -> Self {
            let summaries = vec![
                ("Inception (2010)", "1375666"),
                ("Inception: The Cobol Job (2010)", "1790736"),
                ("Inception: Jump Right Into the Action (2010)", "5295990"),
                ("Inception (2014)", "3495026"),
                ("The Crack: Inception (2019)", "6793710"),
            ]
            .into_iter()
            .map(|(title, id)| MovieSummary {
                display_title: title.to_string(),
                id: id.to_string(),
            })
            .collect();
            Self {
                summaries,
                detail: MovieDetail {
                    titles: vec!["Inception".to_string()],
                    year: Some(2010),
                    countries: Some("United States, United Kingdom".to_string()),
                    directors: Some("Christopher Nolan".to_string()),
                    genres: Some("Action, Adventure, Sci-Fi".to_string()),
                    rating: Some(8.8),
                    plot: Some("A thief enters dreams to steal secrets.".to_string()),
                    cover_url: None,
                },
                cast: vec![CastEntry {
                    name: "Leonardo DiCaprio".to_string(),
                    role: Some("Cobb".to_string()),
                    note: None,
                }],
                synopsis: Some("The top keeps spinning.".to_string()),
                release_dates: vec!["USA::16 July 2010".to_string()],
                fail_detail: false,
                search_calls: Mutex::new(0),
                detail_calls: Mutex::new(0),
                synopsis_calls: Mutex::new(0),
            }
        }

        fn without_results() -> Self {
            Self {
                summaries: Vec::new(),
                ..Self::inception()
            }
        }

        fn search_calls(&self) -> usize {
            *self.search_calls.lock().unwrap()
        }

        fn detail_calls(&self) -> usize {
            *self.detail_calls.lock().unwrap()
        }

        fn synopsis_calls(&self) -> usize {
            *self.synopsis_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl MetadataProvider for MockMetadata {
        async fn search_titles(&self, _query: &str, limit: usize) -> Result<Vec<MovieSummary>> {
            *self.search_calls.lock().unwrap() += 1;
            Ok(self.summaries.iter().take(limit).cloned().collect())
        }

        async fn detail(&self, _id: &str) -> Result<MovieDetail> {
            *self.detail_calls.lock().unwrap() += 1;
            if self.fail_detail {
                return Err(BotError::lookup("metadata backend unavailable"));
            }
            Ok(self.detail.clone())
        }

        async fn cast(&self, _id: &str) -> Result<Vec<CastEntry>> {
            Ok(self.cast.clone())
        }

        async fn synopsis(&self, _id: &str) -> Result<Option<String>> {
            *self.synopsis_calls.lock().unwrap() += 1;
            Ok(self.synopsis.clone())
        }

        async fn release_dates(&self, _id: &str) -> Result<Vec<String>> {
            Ok(self.release_dates.clone())
        }
    }

    struct MockListing {
        html: Option<String>,
    }

    #[async_trait]
    impl GenreListing for MockListing {
        async fn fetch_listing_page(&self, _slug: &str, _start: usize) -> Result<String> {
            self.html
                .clone()
                .ok_or_else(|| BotError::lookup("listing fetch failed"))
        }
    }

    #[derive(Default)]
    struct MockVideo {
        results: Vec<VideoResult>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VideoSearch for MockVideo {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<VideoResult>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.results.iter().take(limit).cloned().collect())
        }
    }

    struct Harness {
        controller: ConversationController,
        transport: Arc<MockTransport>,
        metadata: Arc<MockMetadata>,
        video: Arc<MockVideo>,
    }

    fn listing_fixture() -> String {
        (0..3)
            .map(|i| {
                format!(
                    "<span class=\"lister-item-header\"><a href=\"/title/tt{:07}/\">M{i}</a></span>",
                    2_000_000 + i
                )
            })
            .collect()
    }

    fn harness_with(metadata: MockMetadata, transport: MockTransport, html: Option<String>) -> Harness {
        let transport = Arc::new(transport);
        let metadata = Arc::new(metadata);
        let video = Arc::new(MockVideo {
            results: vec![VideoResult {
                title: "Inception (2010) Official Trailer".to_string(),
                link: "https://youtube.example/watch?v=1".to_string(),
            }],
            queries: Mutex::new(Vec::new()),
        });
        let listing = Arc::new(MockListing { html });
        let controller = ConversationController::new(
            transport.clone(),
            metadata.clone(),
            listing,
            video.clone(),
        );
        Harness {
            controller,
            transport,
            metadata,
            video,
        }
    }

    fn harness() -> Harness {
        harness_with(
            MockMetadata::inception(),
            MockTransport::default(),
            Some(listing_fixture()),
        )
    }

    fn message(text: &str) -> IncomingMessage {
        IncomingMessage {
            chat: ChatRef(10),
            user: UserId(1),
            message: MessageRef {
                chat: ChatRef(10),
                id: 1,
            },
            text: text.to_string(),
        }
    }

    fn callback(action: CallbackAction) -> IncomingCallback {
        IncomingCallback {
            user: UserId(1),
            message: MessageRef {
                chat: ChatRef(10),
                id: 50,
            },
            callback: CallbackRef("cb-1".to_string()),
            action: Some(action),
        }
    }

    fn inline_labels(markup: &ReplyMarkup) -> Vec<String> {
        match markup {
            ReplyMarkup::Inline(rows) => rows
                .iter()
                .flatten()
                .map(|control| control.label.clone())
                .collect(),
            ReplyMarkup::Menu(_) => panic!("expected an inline keyboard"),
        }
    }

    #[tokio::test]
    async fn start_shows_greeting_with_main_menu() {
        let h = harness();
        h.controller.handle_message(message("/start")).await;
        let log = h.transport.log();
        assert_eq!(log.len(), 1);
        match &log[0] {
            Delivery::Sent { text, markup } => {
                assert!(text.starts_with("Hi! This is Reelbot"));
                assert_eq!(
                    markup,
                    &Some(ReplyMarkup::Menu(vec![
                        texts::FIND_MOVIE.to_string(),
                        texts::PICK_MOVIE.to_string(),
                    ]))
                );
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn find_movie_arms_the_title_prompt() {
        let h = harness();
        h.controller.handle_message(message(texts::FIND_MOVIE)).await;
        assert_eq!(
            h.controller.sessions.state(UserId(1)).await,
            SessionState::AwaitingTitle
        );
        match &h.transport.log()[0] {
            Delivery::Replied { text, markup, .. } => {
                assert_eq!(text, texts::TITLE_PROMPT);
                assert_eq!(
                    inline_labels(markup.as_ref().expect("prompt has a cancel button")),
                    vec![texts::CANCEL_LABEL.to_string()]
                );
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn title_query_renders_candidates_and_resets_state() {
        let h = harness();
        h.controller.handle_message(message(texts::FIND_MOVIE)).await;
        h.controller.handle_message(message("Inception")).await;
        assert_eq!(
            h.controller.sessions.state(UserId(1)).await,
            SessionState::Idle
        );
        let log = h.transport.log();
        match log.last().expect("candidates were sent") {
            Delivery::Replied { text, markup, .. } => {
                assert_eq!(text, texts::CHOOSE_MOVIE);
                let labels = inline_labels(markup.as_ref().expect("candidate keyboard"));
                assert_eq!(labels.len(), MAX_SEARCH_RESULTS + 1);
                assert_eq!(labels[0], "Inception (2010)");
                assert_eq!(labels.last().unwrap(), texts::CANCEL_LABEL);
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_results_report_and_reset() {
        let h = harness_with(
            MockMetadata::without_results(),
            MockTransport::default(),
            None,
        );
        h.controller.handle_message(message(texts::FIND_MOVIE)).await;
        h.controller.handle_message(message("qqqq")).await;
        assert_eq!(
            h.controller.sessions.state(UserId(1)).await,
            SessionState::Idle
        );
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Replied { text, .. } if text == texts::NO_RESULTS
        )));
    }

    #[tokio::test]
    async fn idle_free_text_is_not_a_title_query() {
        let h = harness();
        h.controller.handle_message(message("Inception")).await;
        assert_eq!(h.metadata.search_calls(), 0);
        assert!(h.transport.log().is_empty());
    }

    #[tokio::test]
    async fn movie_selection_renders_detail_with_action_buttons() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::Movie("1375666".to_string())))
            .await;
        let log = h.transport.log();
        match &log[0] {
            Delivery::Edited { id, text, markup } => {
                assert_eq!(*id, 50);
                assert!(text.contains("<b>Title</b>: Inception"));
                assert!(text.contains("<b>Release year</b>: 2010"));
                assert_eq!(
                    inline_labels(markup.as_ref().expect("action keyboard")),
                    vec!["Cast", "Synopsis", "Trailers"]
                );
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
        match log.last().expect("menu follows the detail block") {
            Delivery::Sent { text, .. } => assert_eq!(text, texts::SELECT_FUNCTION),
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_year_is_resolved_from_release_dates() {
        let mut metadata = MockMetadata::inception();
        metadata.detail.year = None;
        let h = harness_with(metadata, MockTransport::default(), None);
        h.controller
            .handle_callback(callback(CallbackAction::Movie("1375666".to_string())))
            .await;
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Edited { text, .. } if text.contains("<b>Release year</b>: 2010")
        )));
    }

    #[tokio::test]
    async fn cast_is_sent_as_a_reply() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::Cast("1375666".to_string())))
            .await;
        match &h.transport.log()[0] {
            Delivery::Replied { to, text, .. } => {
                assert_eq!(*to, 50);
                assert!(text.starts_with("<b>Cast</b>:"));
                assert!(text.contains("1. <b>Leonardo DiCaprio</b> as Cobb"));
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn trailers_use_the_year_qualified_query() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::Trailers("1375666".to_string())))
            .await;
        assert_eq!(
            h.video.queries.lock().unwrap().as_slice(),
            ["Inception (2010) trailer"]
        );
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Replied { text, .. } if text.starts_with("<b>Trailers</b>:")
        )));
    }

    #[tokio::test]
    async fn synopsis_is_gated_behind_the_spoiler_prompt() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::Synopsis("1375666".to_string())))
            .await;
        assert_eq!(h.metadata.synopsis_calls(), 0);
        match &h.transport.log()[0] {
            Delivery::Replied { text, markup, .. } => {
                assert!(text.contains("Spoilers!"));
                assert_eq!(
                    inline_labels(markup.as_ref().expect("confirmation keyboard")),
                    vec![texts::YES_LABEL.to_string(), texts::NO_LABEL.to_string()]
                );
            }
            other => panic!("unexpected delivery: {other:?}"),
        }

        h.controller
            .handle_callback(callback(CallbackAction::ShowSynopsis("1375666".to_string())))
            .await;
        assert_eq!(h.metadata.synopsis_calls(), 1);
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Edited { text, .. } if text.starts_with("<b>Synopsis</b>:")
        )));
    }

    #[tokio::test]
    async fn declined_synopsis_deletes_the_prompt() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::CancelSynopsis))
            .await;
        assert_eq!(h.transport.log(), vec![Delivery::Deleted { id: 50 }]);
    }

    #[tokio::test]
    async fn declined_synopsis_edits_in_place_when_delete_fails() {
        let h = harness_with(
            MockMetadata::inception(),
            MockTransport::failing_deletes(),
            None,
        );
        h.controller
            .handle_callback(callback(CallbackAction::CancelSynopsis))
            .await;
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Edited { text, .. } if text == texts::SYNOPSIS_DECLINED
        )));
    }

    #[tokio::test]
    async fn cancel_search_resets_state_and_reshows_the_menu() {
        let h = harness();
        h.controller.handle_message(message(texts::FIND_MOVIE)).await;
        h.controller
            .handle_callback(callback(CallbackAction::CancelSearch))
            .await;
        assert_eq!(
            h.controller.sessions.state(UserId(1)).await,
            SessionState::Idle
        );
        let log = h.transport.log();
        assert!(log.contains(&Delivery::Deleted { id: 50 }));
        assert!(log.iter().any(|d| matches!(
            d,
            Delivery::Sent { text, .. }
                if text.contains("Canceling...") && text.contains(texts::SELECT_FUNCTION)
        )));
    }

    #[tokio::test]
    async fn any_callback_while_awaiting_title_cancels() {
        let h = harness();
        h.controller.handle_message(message(texts::FIND_MOVIE)).await;
        h.controller
            .handle_callback(callback(CallbackAction::Movie("1375666".to_string())))
            .await;
        assert_eq!(
            h.controller.sessions.state(UserId(1)).await,
            SessionState::Idle
        );
        // The selection was treated as a cancel: no detail lookup happened.
        assert_eq!(h.metadata.detail_calls(), 0);
    }

    #[tokio::test]
    async fn genre_pick_renders_a_detail_block() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::Genre("Sci-Fi".to_string())))
            .await;
        assert_eq!(h.metadata.detail_calls(), 1);
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Edited { text, .. } if text.contains("<b>Title</b>: Inception")
        )));
    }

    #[tokio::test]
    async fn failed_genre_pick_reports_and_recovers() {
        let h = harness_with(MockMetadata::inception(), MockTransport::default(), None);
        h.controller
            .handle_callback(callback(CallbackAction::Genre("Western".to_string())))
            .await;
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Replied { text, .. } if text == texts::PICK_FAILED
        )));
        assert_eq!(h.metadata.detail_calls(), 0);
    }

    #[tokio::test]
    async fn empty_listing_page_fails_the_pick_recoverably() {
        let h = harness_with(
            MockMetadata::inception(),
            MockTransport::default(),
            Some("<html><body>nothing here</body></html>".to_string()),
        );
        h.controller
            .handle_callback(callback(CallbackAction::Genre("Drama".to_string())))
            .await;
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Replied { text, .. } if text == texts::PICK_FAILED
        )));
    }

    #[tokio::test]
    async fn genre_page_turn_edits_only_the_keyboard() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::GenresPage(2)))
            .await;
        match &h.transport.log()[0] {
            Delivery::KeyboardEdited { id, markup } => {
                assert_eq!(*id, 50);
                assert_eq!(markup, &genres::genre_page(1));
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn out_of_range_genre_page_is_ignored() {
        let h = harness();
        h.controller
            .handle_callback(callback(CallbackAction::GenresPage(9)))
            .await;
        assert!(h.transport.log().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_a_retry_notice() {
        let mut metadata = MockMetadata::inception();
        metadata.fail_detail = true;
        let h = harness_with(metadata, MockTransport::default(), None);
        h.controller
            .handle_callback(callback(CallbackAction::Movie("1375666".to_string())))
            .await;
        assert!(h.transport.log().iter().any(|d| matches!(
            d,
            Delivery::Sent { text, .. } if text == texts::TRY_AGAIN
        )));
    }

    #[tokio::test]
    async fn unknown_payload_in_idle_state_does_nothing() {
        let h = harness();
        let mut cb = callback(CallbackAction::CancelSearch);
        cb.action = None;
        h.controller.handle_callback(cb).await;
        assert!(h.transport.log().is_empty());
        assert_eq!(
            h.controller.sessions.state(UserId(1)).await,
            SessionState::Idle
        );
    }
}
