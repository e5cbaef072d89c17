use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub minio: MinIOConfig,
    pub vision: VisionConfig,
    pub gemini: GeminiConfig,
    pub mail: Option<MailConfig>,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Signing secret and lifetimes for locally issued JWTs
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for report images
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
    /// Key prefix under which report images are stored
    pub report_prefix: String,
    /// Presigned URL expiry time in seconds
    pub presigned_url_expiry_secs: u32,
}

/// Label-detection (Cloud Vision) API settings
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// `None` when unset; the placeholder value "key" is kept and rejected at call time
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

/// Generative-text (Gemini) API settings
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

/// SMTP relay settings. Absent when `SMTP_HOST` is not set.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

/// Recipients of report notifications
#[derive(Debug, Clone, Default)]
pub struct NotificationConfig {
    pub authority_email: Option<String>,
    pub ngo_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            minio: MinIOConfig::from_env()?,
            vision: VisionConfig::from_env()?,
            gemini: GeminiConfig::from_env(),
            mail: MailConfig::from_env()?,
            notifications: NotificationConfig::from_env(),
        })
    }
}

/// Read an optional variable, treating an empty value as unset
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    const DEFAULT_CORS_ALLOWED_ORIGINS: &'static str =
        "http://localhost:5173,http://127.0.0.1:5173";

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| Self::DEFAULT_CORS_ALLOWED_ORIGINS.to_string()),
        );

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated origin allowlist
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_ACCESS_TTL_MINS: u64 = 60;
    const DEFAULT_REFRESH_TTL_DAYS: u64 = 1;
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = optional_var("JWT_SECRET")
            .ok_or_else(|| "JWT_SECRET environment variable is required".to_string())?;

        let access_mins = env::var("JWT_ACCESS_TTL_MINS")
            .unwrap_or_else(|_| Self::DEFAULT_ACCESS_TTL_MINS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_ACCESS_TTL_MINS must be a valid number".to_string())?;

        let refresh_days = env::var("JWT_REFRESH_TTL_DAYS")
            .unwrap_or_else(|_| Self::DEFAULT_REFRESH_TTL_DAYS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_REFRESH_TTL_DAYS must be a valid number".to_string())?;

        let leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            access_token_ttl: Duration::from_secs(access_mins * 60),
            refresh_token_ttl: Duration::from_secs(refresh_days * 24 * 60 * 60),
            jwt_leeway: Duration::from_secs(leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = optional_var("SWAGGER_USERNAME");
        let password = optional_var("SWAGGER_PASSWORD");
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "EcoAI API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Citizen waste reporting API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    const DEFAULT_PRESIGNED_URL_EXPIRY_SECS: u32 = 3600; // 1 hour

    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());
        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "ecoai-reports".to_string());
        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let report_prefix =
            env::var("MINIO_REPORT_PREFIX").unwrap_or_else(|_| "reports".to_string());

        let presigned_url_expiry_secs = env::var("MINIO_PRESIGNED_URL_EXPIRY_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_PRESIGNED_URL_EXPIRY_SECS.to_string())
            .parse::<u32>()
            .map_err(|_| "MINIO_PRESIGNED_URL_EXPIRY_SECS must be a valid number".to_string())?;

        Ok(Self {
            endpoint,
            access_key,
            secret_key,
            bucket,
            region,
            report_prefix,
            presigned_url_expiry_secs,
        })
    }
}

impl VisionConfig {
    const DEFAULT_API_URL: &'static str = "https://vision.googleapis.com/v1/images:annotate";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let timeout_secs = env::var("VISION_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "VISION_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key: optional_var("GOOGLE_CLOUD_VISION_API_KEY"),
            api_url: env::var("VISION_API_URL").unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl GeminiConfig {
    const DEFAULT_API_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";

    pub fn from_env() -> Self {
        Self {
            api_key: optional_var("GEMINI_API_KEY"),
            api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string()),
        }
    }
}

impl MailConfig {
    const DEFAULT_SMTP_PORT: u16 = 587;
    const DEFAULT_FROM_ADDRESS: &'static str = "noreply@ecoai.local";

    /// Returns `Ok(None)` when `SMTP_HOST` is unset so that no mailer is built
    pub fn from_env() -> Result<Option<Self>, String> {
        let Some(smtp_host) = optional_var("SMTP_HOST") else {
            return Ok(None);
        };

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_SMTP_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| "SMTP_PORT must be a valid port number".to_string())?;

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            from_address: optional_var("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|| Self::DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: optional_var("SMTP_USER"),
            smtp_password: optional_var("SMTP_PASSWORD"),
        }))
    }
}

impl NotificationConfig {
    pub fn from_env() -> Self {
        Self {
            authority_email: optional_var("AUTHORITY_EMAIL"),
            ngo_email: optional_var("NGO_EMAIL"),
        }
    }
}
