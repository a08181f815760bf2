//! # Leaderboard Client
//!
//! Fire-and-forget access to a [`LeaderboardService`] running on a tokio task.
//!
//! Every call returns immediately with a [`PendingReply`]. Callers poll it
//! between moves or await it when they have nothing better to do; a slow,
//! failing, or missing service only ever produces an error reply.

use crate::{
    HeatseekerError, HeatseekerResult, LeaderboardEntry, LeaderboardService, ProgressReceipt,
    ProgressReport, SessionId,
};
use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

type Reply<T> = oneshot::Sender<HeatseekerResult<T>>;

enum Request {
    StartSession(Reply<SessionId>),
    RecordProgress(ProgressReport, Reply<ProgressReceipt>),
    FetchLeaderboard(Reply<Vec<LeaderboardEntry>>),
}

impl Request {
    /// Answers the request with an error without reaching the service.
    fn fail(self, reason: &str) {
        let error = || HeatseekerError::Leaderboard(reason.to_string());
        // The caller may have stopped listening
        match self {
            Request::StartSession(reply) => drop(reply.send(Err(error()))),
            Request::RecordProgress(_, reply) => drop(reply.send(Err(error()))),
            Request::FetchLeaderboard(reply) => drop(reply.send(Err(error()))),
        }
    }
}

/// A reply that may not have arrived yet.
#[derive(Debug)]
pub struct PendingReply<T> {
    receiver: oneshot::Receiver<HeatseekerResult<T>>,
}

impl<T> PendingReply<T> {
    /// Returns the reply if it has arrived, without waiting.
    ///
    /// Once this has returned `Some`, the reply is consumed.
    pub fn try_take(&mut self) -> Option<HeatseekerResult<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(HeatseekerError::Leaderboard(
                "leaderboard service dropped the request".to_string(),
            ))),
        }
    }

    /// Waits for the reply.
    pub async fn wait(self) -> HeatseekerResult<T> {
        self.receiver.await.unwrap_or_else(|_| {
            Err(HeatseekerError::Leaderboard(
                "leaderboard service dropped the request".to_string(),
            ))
        })
    }
}

/// Cloneable handle to a leaderboard service task.
///
/// # Examples
///
/// ```
/// use heatseeker::{InMemoryLeaderboard, LeaderboardClient};
///
/// tokio_test::block_on(async {
///     let (client, _task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
///     let session = client.start_session().wait().await.unwrap();
///     assert!(!session.is_nil());
/// });
/// ```
#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    sender: mpsc::UnboundedSender<Request>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::StartSession(_) => f.write_str("StartSession"),
            Request::RecordProgress(report, _) => write!(f, "RecordProgress({:?})", report),
            Request::FetchLeaderboard(_) => f.write_str("FetchLeaderboard"),
        }
    }
}

impl LeaderboardClient {
    /// Moves `service` onto a new tokio task and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime. The task ends once every
    /// client handle has been dropped.
    pub fn spawn<S>(service: S) -> (Self, JoinHandle<()>)
    where
        S: LeaderboardService + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(serve(service, receiver));
        (Self { sender }, task)
    }

    /// A client with no service behind it; every request fails immediately.
    pub fn disconnected() -> Self {
        let (sender, _receiver) = mpsc::unbounded_channel();
        Self { sender }
    }

    /// Registers a new run.
    pub fn start_session(&self) -> PendingReply<SessionId> {
        self.request(Request::StartSession)
    }

    /// Submits progress for a run.
    pub fn record_progress(&self, report: ProgressReport) -> PendingReply<ProgressReceipt> {
        self.request(|reply| Request::RecordProgress(report, reply))
    }

    /// Asks for the current top entries.
    pub fn fetch_leaderboard(&self) -> PendingReply<Vec<LeaderboardEntry>> {
        self.request(Request::FetchLeaderboard)
    }

    fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Request) -> PendingReply<T> {
        let (reply, receiver) = oneshot::channel();
        if let Err(mpsc::error::SendError(request)) = self.sender.send(build(reply)) {
            warn!("Leaderboard unavailable, dropping {:?}", request);
            request.fail("leaderboard service is not running");
        }
        PendingReply { receiver }
    }
}

async fn serve<S: LeaderboardService>(mut service: S, mut requests: mpsc::UnboundedReceiver<Request>) {
    debug!("Leaderboard service started");
    while let Some(request) = requests.recv().await {
        // Replies to callers that stopped listening are simply discarded
        match request {
            Request::StartSession(reply) => {
                let _ = reply.send(service.start_session());
            }
            Request::RecordProgress(report, reply) => {
                let _ = reply.send(service.record_progress(report));
            }
            Request::FetchLeaderboard(reply) => {
                let _ = reply.send(service.fetch_leaderboard());
            }
        }
    }
    debug!("Leaderboard service stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryLeaderboard, RunProgress};

    struct BrokenLeaderboard;

    impl LeaderboardService for BrokenLeaderboard {
        fn start_session(&mut self) -> HeatseekerResult<SessionId> {
            Err(HeatseekerError::Leaderboard("offline".to_string()))
        }

        fn record_progress(&mut self, _report: ProgressReport) -> HeatseekerResult<ProgressReceipt> {
            Err(HeatseekerError::Leaderboard("offline".to_string()))
        }

        fn fetch_leaderboard(&self) -> HeatseekerResult<Vec<LeaderboardEntry>> {
            Err(HeatseekerError::Leaderboard("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_task() {
        let (client, _task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
        let session = client.start_session().wait().await.unwrap();

        let report = ProgressReport::new(
            session,
            RunProgress {
                level_reached: 2,
                total_moves: 33,
            },
        )
        .with_player_name("Ada");
        let receipt = client.record_progress(report).wait().await.unwrap();
        assert_eq!(receipt.rank, 1);

        let entries = client.fetch_leaderboard().wait().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total_moves, 33);
    }

    #[tokio::test]
    async fn test_service_errors_become_replies() {
        let (client, _task) = LeaderboardClient::spawn(BrokenLeaderboard);
        assert!(client.start_session().wait().await.is_err());
        assert!(client.fetch_leaderboard().wait().await.is_err());
    }

    #[test]
    fn test_disconnected_client_fails_fast() {
        let client = LeaderboardClient::disconnected();
        let mut pending = client.start_session();
        assert!(matches!(
            pending.try_take(),
            Some(Err(HeatseekerError::Leaderboard(_)))
        ));
    }

    #[tokio::test]
    async fn test_try_take_eventually_resolves() {
        let (client, _task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
        let mut pending = client.start_session();

        let mut result = None;
        for _ in 0..100 {
            if let Some(reply) = pending.try_take() {
                result = Some(reply);
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(result.expect("reply should arrive").is_ok());
    }

    #[tokio::test]
    async fn test_task_stops_when_clients_drop() {
        let (client, task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
        drop(client);
        task.await.unwrap();
    }
}
