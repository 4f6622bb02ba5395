//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use taskin_core::config::AppConfig;
use taskin_core::traits::geolocation::WatchOptions;
use taskin_database::memory::{
    MemoryChatRepository, MemoryLocationRepository, MemoryNotificationRepository,
    MemoryPaymentRepository, MemoryProfileRepository, MemoryRatingRepository,
    MemoryRequestRepository, MemoryRoleRepository, MemoryTaskRepository,
};
use taskin_database::repositories::chat::{ChatRepository, PgChatRepository};
use taskin_database::repositories::location::{LocationRepository, PgLocationRepository};
use taskin_database::repositories::notification::{
    NotificationRepository, PgNotificationRepository,
};
use taskin_database::repositories::payment::{PaymentRepository, PgPaymentRepository};
use taskin_database::repositories::profile::{PgProfileRepository, ProfileRepository};
use taskin_database::repositories::rating::{PgRatingRepository, RatingRepository};
use taskin_database::repositories::request::{PgRequestRepository, RequestRepository};
use taskin_database::repositories::role::{PgRoleRepository, RoleRepository};
use taskin_database::repositories::task::{PgTaskRepository, TaskRepository};
use taskin_realtime::ChangeBroadcaster;
use taskin_service::chat::ChatService;
use taskin_service::notification::NotificationService;
use taskin_service::payment::PaymentService;
use taskin_service::profile::ProfileService;
use taskin_service::rating::RatingService;
use taskin_service::request::RequestService;
use taskin_service::task::TaskService;
use taskin_service::tracking::TrackingService;

use crate::auth::JwtVerifier;

/// The full set of storage backends behind the services.
///
/// One seam for both deployments: [`Repositories::postgres`] in the
/// server binary, [`Repositories::in_memory`] in API tests.
#[derive(Clone)]
pub struct Repositories {
    pub requests: Arc<dyn RequestRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub roles: Arc<dyn RoleRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories over one shared pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            requests: Arc::new(PgRequestRepository::new(pool.clone())),
            locations: Arc::new(PgLocationRepository::new(pool.clone())),
            chats: Arc::new(PgChatRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool.clone())),
            payments: Arc::new(PgPaymentRepository::new(pool.clone())),
            ratings: Arc::new(PgRatingRepository::new(pool.clone())),
            tasks: Arc::new(PgTaskRepository::new(pool.clone())),
            profiles: Arc::new(PgProfileRepository::new(pool.clone())),
            roles: Arc::new(PgRoleRepository::new(pool)),
        }
    }

    /// Dashmap-backed repositories for tests and local development.
    pub fn in_memory() -> Self {
        Self {
            requests: Arc::new(MemoryRequestRepository::new()),
            locations: Arc::new(MemoryLocationRepository::new()),
            chats: Arc::new(MemoryChatRepository::new()),
            notifications: Arc::new(MemoryNotificationRepository::new()),
            payments: Arc::new(MemoryPaymentRepository::new()),
            ratings: Arc::new(MemoryRatingRepository::new()),
            tasks: Arc::new(MemoryTaskRepository::new()),
            profiles: Arc::new(MemoryProfileRepository::new()),
            roles: Arc::new(MemoryRoleRepository::new()),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-backed for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Bearer-token verifier.
    pub jwt: Arc<JwtVerifier>,
    /// Change feed shared by services and live endpoints.
    pub broadcaster: Arc<ChangeBroadcaster>,
    /// Storage backends, kept for role lookups and admin wiring.
    pub repos: Repositories,

    pub requests: RequestService,
    pub tracking: TrackingService,
    pub chat: ChatService,
    pub notifications: NotificationService,
    pub payments: PaymentService,
    pub ratings: RatingService,
    pub tasks: TaskService,
    pub profiles: ProfileService,
}

impl AppState {
    /// Wire services over the given backends.
    pub fn new(config: Arc<AppConfig>, repos: Repositories) -> Self {
        let broadcaster = Arc::new(ChangeBroadcaster::new(config.realtime.channel_buffer_size));
        let jwt = Arc::new(JwtVerifier::new(&config.auth));

        let notifications =
            NotificationService::new(repos.notifications.clone(), broadcaster.clone());
        let requests = RequestService::new(
            repos.requests.clone(),
            repos.roles.clone(),
            notifications.clone(),
            broadcaster.clone(),
        );
        let tracking = TrackingService::new(
            repos.locations.clone(),
            repos.requests.clone(),
            broadcaster.clone(),
            WatchOptions {
                high_accuracy: config.tracking.high_accuracy,
                max_sample_age: Duration::from_secs(config.tracking.max_sample_age_seconds),
                sample_timeout: Duration::from_secs(config.tracking.sample_timeout_seconds),
            },
        );
        let chat = ChatService::new(
            repos.chats.clone(),
            repos.requests.clone(),
            notifications.clone(),
            broadcaster.clone(),
        );
        let payments = PaymentService::new(
            repos.payments.clone(),
            repos.requests.clone(),
            notifications.clone(),
            broadcaster.clone(),
        );
        let ratings = RatingService::new(repos.ratings.clone(), repos.requests.clone());
        let tasks = TaskService::new(repos.tasks.clone());
        let profiles = ProfileService::new(repos.profiles.clone(), repos.roles.clone());

        Self {
            config,
            jwt,
            broadcaster,
            repos,
            requests,
            tracking,
            chat,
            notifications,
            payments,
            ratings,
            tasks,
            profiles,
        }
    }
}
