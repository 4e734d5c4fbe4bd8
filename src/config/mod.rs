mod loader;
mod model;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem,
    validate_config_semantics,
};
pub use model::{
    CONFIG_VERSION, Config, DEFAULT_INTAKE_AMOUNT_ML, IntakeConfig, MissingDayPolicy,
    StatsConfig,
};
