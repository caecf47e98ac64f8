//! Browse the catalogue from the terminal through the client-side stack.
//!
//! Sessions persist between runs in the configured session directory, so
//! `--email`/`--password` are only needed once.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use multiverse::domain::catalogue::CatalogueService;
use multiverse::domain::listing::{ListingController, ListingStatus};
use multiverse::domain::{
    AuthGate, Character, CharacterFilters, EntityId, Episode, EpisodeFilters, GuardDecision,
    Location, LocationFilters, Resource,
};
use multiverse::outbound::auth::HttpLoginGateway;
use multiverse::outbound::rick_and_morty::ReqwestCatalogueTransport;
use multiverse::outbound::storage::DirSessionStore;
use multiverse::settings::AppSettings;
use ortho_config::OrthoConfig;
use pagination::{Page, PageNumber};
use serde::Serialize;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

/// Collection to browse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Characters,
    Locations,
    Episodes,
}

impl Kind {
    const fn route(self) -> &'static str {
        match self {
            Self::Characters => "/characters",
            Self::Locations => "/locations",
            Self::Episodes => "/episodes",
        }
    }
}

/// `browse` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "browse",
    about = "List or inspect Rick and Morty characters, locations and episodes",
    version
)]
struct CliArgs {
    /// Collection to browse.
    #[arg(value_enum)]
    kind: Kind,
    /// Show one entity with its cross-references instead of a listing.
    #[arg(long, value_name = "id")]
    id: Option<EntityId>,
    /// One-based page number.
    #[arg(long, value_name = "n", default_value_t = PageNumber::FIRST)]
    page: PageNumber,
    /// Name filter (all collections).
    #[arg(long)]
    name: Option<String>,
    /// Character status: alive, dead or unknown.
    #[arg(long)]
    status: Option<String>,
    /// Character species.
    #[arg(long)]
    species: Option<String>,
    /// Character or location type.
    #[arg(long = "type")]
    kind_filter: Option<String>,
    /// Character gender.
    #[arg(long)]
    gender: Option<String>,
    /// Location dimension.
    #[arg(long)]
    dimension: Option<String>,
    /// Episode code, e.g. `S01` or `S02E03`.
    #[arg(long)]
    episode: Option<String>,
    /// Log in before browsing.
    #[arg(long, requires = "password")]
    email: Option<String>,
    /// Password for `--email`.
    #[arg(long, requires = "email")]
    password: Option<String>,
    /// Forget the stored session and exit.
    #[arg(long, conflicts_with_all = ["email", "id"])]
    logout: bool,
}

impl CliArgs {
    fn character_filters(&self) -> CharacterFilters {
        CharacterFilters {
            name: self.name.clone(),
            status: self.status.clone(),
            species: self.species.clone(),
            kind: self.kind_filter.clone(),
            gender: self.gender.clone(),
        }
    }

    fn location_filters(&self) -> LocationFilters {
        LocationFilters {
            name: self.name.clone(),
            kind: self.kind_filter.clone(),
            dimension: self.dimension.clone(),
        }
    }

    fn episode_filters(&self) -> EpisodeFilters {
        EpisodeFilters {
            name: self.name.clone(),
            episode: self.episode.clone(),
        }
    }
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        let _ = writeln!(io::stderr(), "tracing init failed: {e}");
    }
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = AppSettings::load_from_iter([OsString::from("browse")])
        .map_err(|error| io::Error::other(format!("configuration: {error}")))?;

    let store = DirSessionStore::open(&settings.session_store_dir()).map_err(io::Error::other)?;
    let login_url = settings.login_url().map_err(io::Error::other)?;
    let gateway = HttpLoginGateway::new(login_url, settings.request_timeout())
        .map_err(|error| io::Error::other(format!("http client: {error}")))?;
    let gate = AuthGate::new(Arc::new(gateway), Arc::new(store));
    gate.rehydrate().await;

    if args.logout {
        gate.logout().await;
        return print_json(&serde_json::json!({ "loggedOut": true }));
    }
    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        gate.login(email, password).await.map_err(io::Error::other)?;
    }
    if gate.guard(args.kind.route()) != GuardDecision::Render {
        return Err(io::Error::other(
            "login required: run again with --email and --password",
        ));
    }

    let base = settings.api_base_url().map_err(io::Error::other)?;
    let transport = ReqwestCatalogueTransport::new(settings.request_timeout())
        .map_err(|error| io::Error::other(format!("http client: {error}")))?;
    let service = CatalogueService::new(Arc::new(transport), base);

    match (args.kind, args.id) {
        (Kind::Characters, Some(id)) => print_json(&detail(service.character_detail(id).await)?),
        (Kind::Locations, Some(id)) => print_json(&detail(service.location_detail(id).await)?),
        (Kind::Episodes, Some(id)) => print_json(&detail(service.episode_detail(id).await)?),
        (Kind::Characters, None) => {
            list::<Character>(service, &settings, args.page, args.character_filters()).await
        }
        (Kind::Locations, None) => {
            list::<Location>(service, &settings, args.page, args.location_filters()).await
        }
        (Kind::Episodes, None) => {
            list::<Episode>(service, &settings, args.page, args.episode_filters()).await
        }
    }
}

fn detail<T, E: std::fmt::Display>(result: Result<T, E>) -> io::Result<T> {
    result.map_err(|error| io::Error::other(error.to_string()))
}

async fn list<R>(
    service: CatalogueService,
    settings: &AppSettings,
    page: PageNumber,
    filters: R::Filters,
) -> io::Result<()>
where
    R: Resource + Serialize + Clone,
{
    let mut controller = ListingController::<R>::with_delay(service, settings.debounce());
    let mut views = controller.subscribe();
    controller.set_filters(filters);
    controller.set_page(page);

    let view = views
        .wait_for(|view| {
            matches!(
                view.status,
                ListingStatus::Loaded(_) | ListingStatus::Failed(_)
            )
        })
        .await
        .map_err(|error| io::Error::other(format!("listing closed: {error}")))?
        .clone();
    match view.status {
        ListingStatus::Loaded(loaded) => print_json(&ListingOutput::new(page, &loaded)),
        ListingStatus::Failed(message) => Err(io::Error::other(message)),
        ListingStatus::Idle | ListingStatus::Loading => Ok(()),
    }
}

/// A settled listing page with the neighbouring page numbers spelled out.
#[derive(Debug, Serialize)]
struct ListingOutput<'a, R> {
    page: PageNumber,
    next_page: Option<PageNumber>,
    prev_page: Option<PageNumber>,
    #[serde(flatten)]
    envelope: &'a Page<R>,
}

impl<'a, R> ListingOutput<'a, R> {
    fn new(page: PageNumber, envelope: &'a Page<R>) -> Self {
        Self {
            page,
            next_page: envelope.info.next_page(),
            prev_page: envelope.info.prev_page(),
            envelope,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")
}
