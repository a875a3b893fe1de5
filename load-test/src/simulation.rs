//! Virtual-user execution.
//!
//! Each user is its own tokio task: it sleeps until its injection offset, then
//! walks the scenario with a private [`UserSession`]. A KO request marks the
//! session failed but the user carries on with the next action.

use crate::check::{self, CheckError};
use crate::feeder::RandomFeeder;
use crate::injection::InjectionProfile;
use crate::metrics::{Metrics, SimulationReport};
use crate::scenario::{Action, Body, RequestStep, Scenario, TOKEN_VAR};
use crate::session::UserSession;
use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::header::AUTHORIZATION;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use videogamedb_core::auth::Credentials;
use videogamedb_core::config::HarnessConfig;
use videogamedb_core::{ApiClient, ApiResponse, FixtureStore};

/// Everything a user task needs, shared read-only.
struct UserContext {
    client: ApiClient,
    scenario: Scenario,
    feeder: RandomFeeder,
    metrics: Arc<Metrics>,
}

pub struct Simulation {
    profile: InjectionProfile,
    context: Arc<UserContext>,
}

impl Simulation {
    /// Load fixtures and build the chain. Fails before any user is started.
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let fixtures = FixtureStore::load(&config.fixtures).context("Failed to load fixtures")?;
        let client = ApiClient::new(&config.api).context("Failed to build HTTP client")?;
        let scenario = Scenario::video_game_chain(
            &Credentials::from_config(&config.api),
            fixtures.new_game_template(),
            config.load.pause(),
        );

        Ok(Self {
            profile: InjectionProfile::from_config(&config.load),
            context: Arc::new(UserContext {
                client,
                scenario,
                feeder: RandomFeeder::new(Arc::new(fixtures)),
                metrics: Arc::new(Metrics::new()),
            }),
        })
    }

    pub fn profile(&self) -> &InjectionProfile {
        &self.profile
    }

    /// Inject every user, wait for all of them, print and return the report.
    pub async fn run(&self) -> Result<SimulationReport> {
        log::info!("Starting test with {} users", self.profile.users);
        log::info!("Ramping users over {} seconds", self.profile.ramp_duration.as_secs());

        let started = Instant::now();
        let mut handles = Vec::with_capacity(self.profile.users as usize);
        for (index, offset) in self.profile.offsets().into_iter().enumerate() {
            let context = Arc::clone(&self.context);
            handles.push(tokio::spawn(async move {
                let elapsed = started.elapsed();
                if offset > elapsed {
                    sleep(offset - elapsed).await;
                }
                run_user(&context, UserSession::new(index)).await
            }));
        }

        let mut failed_users = 0;
        for outcome in join_all(handles).await {
            let session = outcome.context("Virtual user task panicked")?;
            if session.is_failed() {
                failed_users += 1;
            }
        }

        let report = self.context.metrics.report().await;
        log::info!(
            "Simulation finished in {:.2}s: {} OK, {} KO, {} of {} users failed",
            started.elapsed().as_secs_f64(),
            report.total_ok(),
            report.total_ko(),
            failed_users,
            self.profile.users
        );
        report.print();
        Ok(report)
    }
}

async fn run_user(context: &UserContext, mut session: UserSession) -> UserSession {
    log::debug!("User {} starting '{}'", session.user_id(), context.scenario.name);
    for action in &context.scenario.actions {
        session = match action {
            Action::Pause(duration) => {
                if !duration.is_zero() {
                    sleep(*duration).await;
                }
                session
            }
            Action::Feed => context.feeder.feed(&session),
            Action::Request(step) => execute(context, step, session).await,
        };
    }
    session
}

async fn execute(context: &UserContext, step: &RequestStep, session: UserSession) -> UserSession {
    let name = session.render(&step.name).unwrap_or_else(|_| step.name.clone());
    let started = Instant::now();

    match send(context, step, &session).await {
        Ok(response) => match check::verify(&step.checks, &response, &session) {
            Ok(next) => {
                context.metrics.record_ok(&name, started.elapsed()).await;
                log::debug!("User {} {} -> {} OK", session.user_id(), name, response.status);
                next
            }
            Err(err) => ko(context, &name, started.elapsed(), &session, err).await,
        },
        Err(err) => ko(context, &name, started.elapsed(), &session, err).await,
    }
}

async fn send(context: &UserContext, step: &RequestStep, session: &UserSession) -> Result<ApiResponse, CheckError> {
    let path = session.render(&step.path)?;
    let mut request = context.client.http().request(step.method.clone(), context.client.url(&path));

    if step.authorized {
        let token = session.render(&format!("#{{{}}}", TOKEN_VAR))?;
        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    request = match &step.body {
        Some(Body::Literal(body)) => request.body(body.clone()),
        Some(Body::Template(template)) => request.body(session.render(template)?),
        None => request,
    };

    Ok(context.client.send(request).await?)
}

async fn ko(
    context: &UserContext,
    name: &str,
    latency: Duration,
    session: &UserSession,
    err: CheckError,
) -> UserSession {
    context.metrics.record_ko(name, latency).await;
    log::warn!("User {} request '{}' KO: {}", session.user_id(), name, err);
    session.mark_failed()
}
