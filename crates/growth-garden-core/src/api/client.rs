//! ApiClient: typed request/response access to the Growth Garden REST API.

use chrono::NaiveDate;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use url::Url;

use super::cache::{Mutation, ResourceCache, ResourceKey};
use crate::error::ApiError;
use crate::model::{
    Action, AuthResponse, Goal, GoalUpdate, Habit, NewAction, NewGoal, Reflection, Snapshot,
    User, WeeklyReport,
};
use crate::session::Session;
use crate::storage::CacheConfig;

/// Client for the Growth Garden API.
///
/// Reads go through a [`ResourceCache`]; each write invalidates the entries
/// it makes stale before returning.
pub struct ApiClient {
    session: Session,
    base_url: Url,
    http_client: Client,
    cache: ResourceCache,
}

impl ApiClient {
    /// Create a client with a default five-minute cache.
    pub fn new(session: Session) -> Result<Self, ApiError> {
        Self::with_cache(session, ResourceCache::from_config(&CacheConfig::default()))
    }

    pub fn with_cache(session: Session, cache: ResourceCache) -> Result<Self, ApiError> {
        let base_url = Url::parse(session.api_base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let http_client = Client::builder().timeout(session.timeout).build()?;

        Ok(Self {
            session,
            base_url,
            http_client,
            cache,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url, authenticated: bool) -> Result<RequestBuilder, ApiError> {
        let mut builder = self
            .http_client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_LANGUAGE, self.session.language.code());

        if authenticated {
            let token = self.session.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder, resource: &str) -> Result<String, ApiError> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        tracing::debug!(status = status.as_u16(), resource, "request failed");
        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound {
                resource: resource.to_string(),
            },
            _ => ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            },
        })
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder, resource: &str) -> Result<T, ApiError> {
        let body = self.send(builder, resource).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn cached_get<T>(&self, key: ResourceKey, segments: &[&str], resource: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(hit) = self.cache.get::<T>(&key) {
            return Ok(hit);
        }
        let generation = self.cache.generation();
        let builder = self.request(Method::GET, self.endpoint(segments), true)?;
        let value: T = self.execute(builder, resource).await?;
        self.cache.put_if_current(key, &value, generation);
        Ok(value)
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B, resource: &str) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, self.endpoint(segments), true)?.json(body);
        self.execute(builder, resource).await
    }

    // Auth

    /// Exchange credentials for a token and attach it to this client's session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let builder = self
            .request(Method::POST, self.endpoint(&["auth", "login"]), false)?
            .json(&json!({ "email": email, "password": password }));
        let auth: AuthResponse = self.execute(builder, "session").await?;

        self.cache.invalidate_all();
        self.session.token = Some(auth.token.clone());
        self.cache.put(ResourceKey::CurrentUser, &auth.user);
        tracing::info!(user = %auth.user.email, "logged in");
        Ok(auth)
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.cached_get(ResourceKey::CurrentUser, &["auth", "me"], "current user").await
    }

    /// End the server session and forget the token locally.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, self.endpoint(&["auth", "logout"]), true)?;
        let result = self.send(builder, "session").await.map(|_| ());

        self.session.token = None;
        self.cache.apply(&Mutation::LoggedOut);
        tracing::info!("logged out");
        match result {
            Err(ApiError::Unauthorized) => Ok(()),
            other => other,
        }
    }

    // Goals

    pub async fn list_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.cached_get(ResourceKey::Goals, &["goals"], "goals").await
    }

    pub async fn get_goal(&self, id: &str) -> Result<Goal, ApiError> {
        self.cached_get(ResourceKey::Goal(id.to_string()), &["goals", id], &format!("goal {id}"))
            .await
    }

    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, ApiError> {
        let created: Goal = self.post_json(&["goals"], goal, "goals").await?;
        self.cache.apply(&Mutation::GoalCreated);
        self.cache.put(ResourceKey::Goal(created.id.clone()), &created);
        tracing::info!(goal_id = %created.id, name = %created.name, "goal planted");
        Ok(created)
    }

    pub async fn update_goal(&self, id: &str, update: &GoalUpdate) -> Result<Goal, ApiError> {
        let builder = self
            .request(Method::PATCH, self.endpoint(&["goals", id]), true)?
            .json(update);
        let updated: Goal = self.execute(builder, &format!("goal {id}")).await?;
        self.cache.apply(&Mutation::GoalUpdated(id.to_string()));
        tracing::info!(goal_id = id, "goal updated");
        Ok(updated)
    }

    pub async fn delete_goal(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, self.endpoint(&["goals", id]), true)?;
        self.send(builder, &format!("goal {id}")).await?;
        self.cache.apply(&Mutation::GoalDeleted(id.to_string()));
        tracing::info!(goal_id = id, "goal deleted");
        Ok(())
    }

    // Actions

    /// All actions, or only those of `goal_id`.
    pub async fn list_actions(&self, goal_id: Option<&str>) -> Result<Vec<Action>, ApiError> {
        let key = ResourceKey::Actions(goal_id.map(str::to_string));
        if let Some(hit) = self.cache.get::<Vec<Action>>(&key) {
            return Ok(hit);
        }

        let generation = self.cache.generation();
        let mut url = self.endpoint(&["actions"]);
        if let Some(goal_id) = goal_id {
            url.query_pairs_mut().append_pair("goal_id", goal_id);
        }
        let builder = self.request(Method::GET, url, true)?;
        let actions: Vec<Action> = self.execute(builder, "actions").await?;
        self.cache.put_if_current(key, &actions, generation);
        Ok(actions)
    }

    pub async fn create_action(&self, action: &NewAction) -> Result<Action, ApiError> {
        action.validate()?;
        let created: Action = self.post_json(&["actions"], action, "actions").await?;
        self.cache.apply(&Mutation::ActionChanged {
            goal_id: Some(created.goal_id.clone()),
        });
        tracing::info!(action_id = %created.id, goal_id = %created.goal_id, "action added");
        Ok(created)
    }

    /// Complete an action, optionally with a reflection. Completing waters
    /// the owning goal, so its cached state is dropped as well.
    pub async fn complete_action(&self, id: &str, reflection: Option<&Reflection>) -> Result<Action, ApiError> {
        let body = match reflection {
            Some(r) => {
                r.validate()?;
                serde_json::to_value(r)?
            }
            None => json!({}),
        };
        let completed: Action = self
            .post_json(&["actions", id, "complete"], &body, &format!("action {id}"))
            .await?;
        self.cache.apply(&Mutation::ActionChanged {
            goal_id: Some(completed.goal_id.clone()),
        });
        tracing::info!(
            action_id = id,
            goal_id = %completed.goal_id,
            xp = completed.xp_reward,
            "action completed"
        );
        Ok(completed)
    }

    pub async fn delete_action(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, self.endpoint(&["actions", id]), true)?;
        self.send(builder, &format!("action {id}")).await?;
        self.cache.apply(&Mutation::ActionChanged { goal_id: None });
        tracing::info!(action_id = id, "action deleted");
        Ok(())
    }

    // Habits

    pub async fn list_habits(&self) -> Result<Vec<Habit>, ApiError> {
        self.cached_get(ResourceKey::Habits, &["habits"], "habits").await
    }

    pub async fn log_habit(&self, id: &str, date: NaiveDate, note: Option<&str>) -> Result<Habit, ApiError> {
        let body = json!({ "date": date, "note": note });
        let habit: Habit = self
            .post_json(&["habits", id, "logs"], &body, &format!("habit {id}"))
            .await?;
        self.cache.apply(&Mutation::HabitLogged);
        tracing::info!(habit_id = id, %date, "habit logged");
        Ok(habit)
    }

    // Reports

    /// Ask the server to generate this week's AI reflection.
    pub async fn generate_weekly_report(&self) -> Result<WeeklyReport, ApiError> {
        let report: WeeklyReport = self
            .post_json(&["reports", "weekly"], &json!({}), "weekly report")
            .await?;
        self.cache.apply(&Mutation::ReportGenerated);
        tracing::info!(report_id = %report.id, "weekly report generated");
        Ok(report)
    }

    pub async fn list_reports(&self) -> Result<Vec<WeeklyReport>, ApiError> {
        self.cached_get(ResourceKey::Reports, &["reports"], "reports").await
    }

    // Aggregate

    /// Fetch goals, actions and habits together.
    pub async fn snapshot(&self) -> Result<Snapshot, ApiError> {
        let (goals, actions, habits) =
            tokio::try_join!(self.list_goals(), self.list_actions(None), self.list_habits())?;
        Ok(Snapshot {
            goals,
            actions,
            habits,
        })
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
