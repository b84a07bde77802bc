use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

pub const MAX_DELAY_SECS: f64 = 300.0;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub browser: BrowserSettings,
    pub scraper: ScraperSettings,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Chrome driven through a WebDriver server
    #[default]
    Webdriver,
    /// Plain HTTP fetch, parsed without rendering
    Http,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BrowserSettings {
    pub engine: Engine,
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,
    pub window_size: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_size: "1920,1080".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ScraperSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_delay_secs: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_delay_secs: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_empty_pages: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_limit: usize,
    pub output_dir: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.amazon.in/s".to_string(),
            min_delay_secs: 2.0,
            max_delay_secs: 4.0,
            max_empty_pages: 3,
            default_limit: 10,
            output_dir: "output".to_string(),
        }
    }
}

impl ScraperSettings {
    /// Delays must be finite, within `0..=MAX_DELAY_SECS` and ordered.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("min_delay_secs", self.min_delay_secs),
            ("max_delay_secs", self.max_delay_secs),
        ] {
            if !value.is_finite() || !(0.0..=MAX_DELAY_SECS).contains(&value) {
                return Err(format!(
                    "scraper.{} must be between 0 and {} seconds, got {}",
                    name, MAX_DELAY_SECS, value
                ));
            }
        }
        if self.min_delay_secs > self.max_delay_secs {
            return Err(format!(
                "scraper.min_delay_secs ({}) is greater than scraper.max_delay_secs ({})",
                self.min_delay_secs, self.max_delay_secs
            ));
        }
        Ok(())
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Layers `configuration/base.yaml`, the environment file picked by
/// `APP_ENVIRONMENT` and `APP_`-prefixed variables (`APP_SCRAPER__OUTPUT_DIR`).
/// Missing files fall back to the defaults above.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings
        .scraper
        .validate()
        .map_err(config::ConfigError::Message)?;

    Ok(settings)
}
