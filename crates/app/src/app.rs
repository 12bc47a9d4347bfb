use directories::ProjectDirs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no platform directories available for {0}")]
    NoProjectDirs(&'static str),
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("logging already initialised: {0}")]
    LoggingInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Directories an application reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    /// Lay out all directories below one base (development builds and tests).
    pub fn under(base: impl AsRef<Path>, app_id: &str) -> Self {
        let root = base.as_ref().join(app_id);
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            log_dir: root.join("data").join("logs"),
        }
    }

    /// Resolve directories for `A`.
    ///
    /// `<APP_ID>_CONFIG` and `<APP_ID>_DATA` win over everything else. Debug
    /// builds otherwise keep their files in `.out/` at the workspace root,
    /// release builds use the platform directories.
    pub fn resolve<A: Application>() -> Result<Self, AppError> {
        #[cfg(debug_assertions)]
        let mut paths = Self::under(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join(".out"),
            A::APP_ID,
        );
        #[cfg(not(debug_assertions))]
        let mut paths = {
            let dirs = ProjectDirs::from(A::QUALIFIER, A::ORGANIZATION, A::APP_ID)
                .ok_or(AppError::NoProjectDirs(A::APP_ID))?;
            Self::from_project_dirs(&dirs)
        };

        if let Some(dir) = env_dir(&A::env_var("CONFIG")) {
            paths.config_dir = dir;
        }
        if let Some(dir) = env_dir(&A::env_var("DATA")) {
            paths.log_dir = dir.join("logs");
            paths.data_dir = dir;
        }
        Ok(paths)
    }

    pub fn from_project_dirs(dirs: &ProjectDirs) -> Self {
        let data_dir = dirs.data_local_dir().to_path_buf();
        Self {
            config_dir: dirs.config_local_dir().to_path_buf(),
            log_dir: data_dir.join("logs"),
            data_dir,
        }
    }

    pub fn ensure_directories(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.data_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| AppError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Log file name for a run started now, e.g. `intake_2024-05-01_09-30-00.log`.
    pub fn log_file_name(app_id: &str) -> String {
        format!(
            "{}_{}.log",
            app_id,
            chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
        )
    }
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Application infrastructure context.
///
/// Contains the resolved directories, version info and the log guard.
pub struct AppContext {
    pub paths: AppPaths,
    pub version: &'static str,
    app_id: &'static str,
    /// The log guard must be kept alive for the duration of the application
    /// to ensure log messages are properly flushed.
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
}

impl AppContext {
    pub fn app_id(&self) -> &str {
        self.app_id
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }
}

/// Application metadata trait.
///
/// Define your application's identity by implementing this trait.
/// This is a pure marker trait - no logic, just constants.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
    const QUALIFIER: &'static str = "com";
    const ORGANIZATION: &'static str = "intake";

    /// `<APP_ID>_<suffix>` in upper case, e.g. `INTAKE_LOG`.
    fn env_var(suffix: &str) -> String {
        format!("{}_{}", Self::APP_ID.to_uppercase(), suffix)
    }
}

/// Builder for creating applications with proper initialization.
pub struct AppBuilder<A: Application> {
    paths: AppPaths,
    version: &'static str,
    console: bool,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    /// Resolve and create the application directories.
    pub fn new(version: &'static str) -> Result<Self, AppError> {
        let paths = AppPaths::resolve::<A>()?;
        Ok(Self::with_paths(version, paths))
    }

    pub fn with_paths(version: &'static str, paths: AppPaths) -> Self {
        Self {
            paths,
            version,
            console: false,
            _marker: PhantomData,
        }
    }

    /// Mirror log output to stderr. Keep this off while a terminal UI owns
    /// the screen.
    pub fn console_log(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Create directories and install the global subscriber.
    ///
    /// The filter is read from `<APP_ID>_LOG` and falls back to `info` in
    /// debug builds and `warn` in release builds.
    pub fn build_simple(self) -> Result<AppContext, AppError> {
        self.paths.ensure_directories()?;

        let file_appender = tracing_appender::rolling::never(
            &self.paths.log_dir,
            AppPaths::log_file_name(A::APP_ID),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let filter = log_filter(&A::env_var("LOG"))?;

        let file_layer = fmt::Layer::default()
            .with_target(false)
            .with_ansi(false)
            .with_writer(non_blocking);

        let console_layer = self.console.then(|| {
            fmt::Layer::default()
                .with_target(false)
                .with_writer(std::io::stderr)
                .boxed()
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .with(tracing_error::ErrorLayer::default())
            .try_init()?;

        tracing::debug!(
            app = A::APP_ID,
            version = self.version,
            log_dir = %self.paths.log_dir.display(),
            "logging initialised"
        );

        Ok(AppContext {
            paths: self.paths,
            version: self.version,
            app_id: A::APP_ID,
            _log_guard: guard,
        })
    }
}

fn log_filter(var: &str) -> Result<EnvFilter, AppError> {
    #[cfg(debug_assertions)]
    let default = "info";
    #[cfg(not(debug_assertions))]
    let default = "warn";

    match std::env::var(var) {
        Ok(directives) if !directives.trim().is_empty() => Ok(EnvFilter::try_new(directives)?),
        _ => Ok(EnvFilter::new(default)),
    }
}
