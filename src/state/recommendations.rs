//! Recommendation request lifecycle
//!
//! Owns the query/tone inputs and the single outstanding request. Every
//! `submit()` gets a new sequence number and supersedes whatever was in
//! flight, so a slow response can never overwrite a newer one.

use std::sync::Arc;

use tokio::task::JoinError;

use crate::recommend::{GameRecommendation, QueryState, RecommendError, RecommendationService};
use crate::state::StateEvent;
use crate::task::{PollResult, SequencedTask, join_task, poll_task};
use crate::tone::Tone;

/// The only failure the rendering layer ever sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Recommendation request failed")]
pub struct RequestFailed;

/// Where the current request stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success(Vec<GameRecommendation>),
    Failed(RequestFailed),
}

/// What the rendering layer should draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultsView<'a> {
    /// Show the loading indicator
    pub loading: bool,
    /// Cards to draw. While loading these are the previous results.
    pub cards: &'a [GameRecommendation],
    /// Show "No recommendations found."
    pub show_empty_message: bool,
}

type FetchOutcome = Result<Vec<GameRecommendation>, RecommendError>;

pub struct RecommendationController {
    service: Arc<dyn RecommendationService>,
    query: QueryState,
    status: RequestStatus,
    /// Results of the last success, kept on screen while a newer request loads
    stale: Vec<GameRecommendation>,
    in_flight: Option<SequencedTask<FetchOutcome>>,
    /// Sequence number of the most recently issued request
    last_seq: u64,
}

impl RecommendationController {
    pub fn new(service: Arc<dyn RecommendationService>) -> Self {
        Self {
            service,
            query: QueryState::default(),
            status: RequestStatus::Idle,
            stale: Vec::new(),
            in_flight: None,
            last_seq: 0,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.query = text.into();
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.query.tone = tone;
    }

    /// Set the tone from free text; values outside the enum become `Tone::Any`
    pub fn set_tone_value(&mut self, value: &str) {
        self.query.tone = Tone::coerce(value);
    }

    pub fn current_state(&self) -> &RequestStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, RequestStatus::Loading)
    }

    /// Results to display: the last success, kept through a reload
    pub fn results(&self) -> &[GameRecommendation] {
        match &self.status {
            RequestStatus::Success(results) => results,
            RequestStatus::Loading => &self.stale,
            RequestStatus::Idle | RequestStatus::Failed(_) => &[],
        }
    }

    pub fn view(&self) -> ResultsView<'_> {
        let loading = self.is_loading();
        let cards = self.results();
        ResultsView {
            loading,
            cards,
            show_empty_message: !loading && cards.is_empty(),
        }
    }

    /// Issue a request for the current query and tone.
    ///
    /// Empty inputs are sent as-is. Returns the request's sequence number.
    pub fn submit(&mut self) -> u64 {
        self.last_seq += 1;
        let seq = self.last_seq;

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!("Request #{} superseded by #{}", previous.seq(), seq);
            previous.abort();
        }

        match std::mem::take(&mut self.status) {
            RequestStatus::Success(results) => self.stale = results,
            RequestStatus::Loading => {}
            RequestStatus::Idle | RequestStatus::Failed(_) => self.stale.clear(),
        }
        self.status = RequestStatus::Loading;

        tracing::info!(
            "Requesting recommendations #{} (query: {:?}, tone: {})",
            seq,
            self.query.query,
            self.query.tone
        );

        let service = Arc::clone(&self.service);
        let payload = self.query.clone();
        self.in_flight = Some(SequencedTask::spawn(seq, async move {
            service.fetch_recommendations(&payload).await
        }));

        seq
    }

    /// Apply the in-flight request if it has finished. Never blocks.
    pub fn poll(&mut self) -> Vec<StateEvent> {
        match poll_task(&mut self.in_flight) {
            PollResult::Complete { seq, result } => self.complete(seq, result),
            PollResult::Pending | PollResult::NoTask => Vec::new(),
        }
    }

    /// Wait for the in-flight request, if any, and apply it
    pub async fn wait(&mut self) -> Vec<StateEvent> {
        match join_task(&mut self.in_flight).await {
            PollResult::Complete { seq, result } => self.complete(seq, result),
            PollResult::Pending | PollResult::NoTask => Vec::new(),
        }
    }

    fn complete(&mut self, seq: u64, result: Result<FetchOutcome, JoinError>) -> Vec<StateEvent> {
        if seq != self.last_seq {
            tracing::debug!("Discarding response for superseded request #{}", seq);
            return Vec::new();
        }

        self.stale.clear();

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Recommendation task #{} did not finish: {}", seq, e);
                return self.fail();
            }
        };

        match outcome {
            Ok(games) => {
                let count = games.len();
                tracing::info!("Request #{} returned {} recommendations", seq, count);
                self.status = RequestStatus::Success(games);
                vec![
                    StateEvent::StatusMessage(format!("Found {} recommendations", count)),
                    StateEvent::RecommendationsChanged,
                ]
            }
            Err(e) => {
                tracing::error!("Error fetching recommendations (#{}): {}", seq, e);
                self.fail()
            }
        }
    }

    fn fail(&mut self) -> Vec<StateEvent> {
        self.status = RequestStatus::Failed(RequestFailed);
        vec![
            StateEvent::StatusMessage(RequestFailed.to_string()),
            StateEvent::RecommendationsChanged,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Reply = Result<Vec<GameRecommendation>, RecommendError>;

    /// Service double. Queries registered with `gate` wait for a reply from
    /// the test; all others answer immediately with `default_reply`.
    struct FakeService {
        gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
        calls: Mutex<Vec<QueryState>>,
        default_reply: fn() -> Reply,
    }

    impl FakeService {
        fn answering(default_reply: fn() -> Reply) -> Arc<Self> {
            Arc::new(Self {
                gates: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
                default_reply,
            })
        }

        fn gate(&self, query: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(query.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<QueryState> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecommendationService for FakeService {
        async fn fetch_recommendations(&self, query: &QueryState) -> Reply {
            self.calls.lock().unwrap().push(query.clone());
            let gate = self.gates.lock().unwrap().remove(&query.query);
            match gate {
                Some(rx) => rx.await.unwrap_or_else(|_| Ok(Vec::new())),
                None => (self.default_reply)(),
            }
        }
    }

    fn game(title: &str) -> GameRecommendation {
        GameRecommendation {
            title: title.to_string(),
            header_image: format!("{title}.jpg"),
            release_date: "2020".to_string(),
            price: "0".to_string(),
            developer: "Studio".to_string(),
            description: "...".to_string(),
            videos: None,
            screenshots: Vec::new(),
            genres: None,
        }
    }

    fn abc() -> Reply {
        Ok(vec![game("A"), game("B"), game("C")])
    }

    fn server_error() -> Reply {
        Err(RecommendError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        })
    }

    fn crash() -> Reply {
        panic!("service crashed")
    }

    fn titles(games: &[GameRecommendation]) -> Vec<&str> {
        games.iter().map(|g| g.title.as_str()).collect()
    }

    #[test]
    fn test_idle_shows_empty_message() {
        let controller = RecommendationController::new(FakeService::answering(abc));
        assert_eq!(controller.current_state(), &RequestStatus::Idle);

        let view = controller.view();
        assert!(!view.loading);
        assert!(view.cards.is_empty());
        assert!(view.show_empty_message);
    }

    #[test]
    fn test_setters() {
        let mut controller = RecommendationController::new(FakeService::answering(abc));
        controller.set_query("space trading");
        controller.set_tone(Tone::Happy);
        assert_eq!(controller.query().query, "space trading");
        assert_eq!(controller.query().tone, Tone::Happy);

        controller.set_tone_value("melancholic");
        assert_eq!(controller.query().tone, Tone::Any);
        controller.set_tone_value("sad");
        assert_eq!(controller.query().tone, Tone::Sad);
    }

    #[tokio::test]
    async fn test_success_preserves_server_order() {
        let mut controller = RecommendationController::new(FakeService::answering(abc));
        controller.set_query("rpg");
        controller.submit();
        assert!(controller.is_loading());

        let events = controller.wait().await;
        assert!(events.iter().any(|e| matches!(e, StateEvent::RecommendationsChanged)));

        match controller.current_state() {
            RequestStatus::Success(games) => assert_eq!(titles(games), vec!["A", "B", "C"]),
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(titles(controller.view().cards), vec!["A", "B", "C"]);
        assert!(!controller.view().show_empty_message);
    }

    #[tokio::test]
    async fn test_empty_inputs_are_still_sent() {
        let service = FakeService::answering(abc);
        let mut controller = RecommendationController::new(service.clone());

        controller.submit();
        controller.wait().await;

        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            serde_json::to_value(&calls[0]).unwrap(),
            serde_json::json!({"query": "", "tone": ""})
        );
    }

    #[tokio::test]
    async fn test_failure_clears_results() {
        let mut controller = RecommendationController::new(FakeService::answering(server_error));
        controller.set_query("anything");
        controller.submit();
        controller.wait().await;

        assert_eq!(controller.current_state(), &RequestStatus::Failed(RequestFailed));
        assert!(controller.results().is_empty());
        assert!(controller.view().show_empty_message);

        // Still usable afterwards
        controller.submit();
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn test_panicking_service_ends_as_failed() {
        let mut controller = RecommendationController::new(FakeService::answering(crash));
        controller.set_query("anything");
        controller.submit();
        controller.wait().await;

        assert_eq!(controller.current_state(), &RequestStatus::Failed(RequestFailed));
        assert!(!controller.is_loading());
        assert!(controller.view().show_empty_message);
    }

    #[tokio::test]
    async fn test_loading_hides_empty_message_and_keeps_stale_results() {
        let service = FakeService::answering(abc);
        let mut controller = RecommendationController::new(service.clone());

        controller.set_query("first");
        controller.submit();
        controller.wait().await;

        let gate = service.gate("second");
        controller.set_query("second");
        controller.submit();

        let view = controller.view();
        assert!(view.loading);
        assert!(!view.show_empty_message);
        assert_eq!(titles(view.cards), vec!["A", "B", "C"]);

        gate.send(server_error()).unwrap();
        controller.wait().await;
        assert!(controller.view().cards.is_empty());
        assert!(controller.view().show_empty_message);
    }

    #[tokio::test]
    async fn test_loading_from_idle_has_no_cards_and_no_message() {
        let service = FakeService::answering(abc);
        let mut controller = RecommendationController::new(service.clone());
        let _gate = service.gate("slow");

        controller.set_query("slow");
        controller.submit();

        let view = controller.view();
        assert!(view.loading);
        assert!(view.cards.is_empty());
        assert!(!view.show_empty_message);
        assert!(controller.poll().is_empty());
    }

    #[tokio::test]
    async fn test_latest_request_wins_when_it_resolves_first() {
        let service = FakeService::answering(abc);
        let mut controller = RecommendationController::new(service.clone());
        let first_gate = service.gate("first");
        let second_gate = service.gate("second");

        controller.set_query("first");
        let first = controller.submit();
        controller.set_query("second");
        let second = controller.submit();
        assert!(second > first);

        second_gate.send(Ok(vec![game("Second")])).unwrap();
        controller.wait().await;
        assert_eq!(titles(controller.results()), vec!["Second"]);

        // The first request was superseded; a late reply changes nothing
        let _ = first_gate.send(Ok(vec![game("First")]));
        tokio::task::yield_now().await;
        assert!(controller.poll().is_empty());
        assert_eq!(titles(controller.results()), vec!["Second"]);
    }

    #[tokio::test]
    async fn test_earlier_reply_does_not_end_loading() {
        let service = FakeService::answering(abc);
        let mut controller = RecommendationController::new(service.clone());
        let first_gate = service.gate("first");
        let second_gate = service.gate("second");

        controller.set_query("first");
        controller.submit();
        controller.set_query("second");
        controller.submit();

        let _ = first_gate.send(Ok(vec![game("First")]));
        tokio::task::yield_now().await;
        controller.poll();
        assert!(controller.is_loading());

        second_gate.send(Ok(vec![game("Second")])).unwrap();
        controller.wait().await;
        assert_eq!(titles(controller.results()), vec!["Second"]);
    }
}
