pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const FLASH_COOKIE: &str = "flash";

/// Upper bound for `UPLOAD_DAYS`, about ten years of upload slots.
pub const MAX_UPLOAD_DAYS: usize = 3660;

fn parse_upload_days(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|days| *days <= MAX_UPLOAD_DAYS)
}

pub struct Env {
    pub secret_key: String,
    pub upload_dir: String,
    pub upload_days: usize,
    pub max_upload_bytes: usize,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let secret_key = std::env::var("SECRET_KEY")
            .expect("SECRET_KEY must be set in .env file or environment variable");

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());
        let upload_days = parse_upload_days(
            &std::env::var("UPLOAD_DAYS").unwrap_or_else(|_| "60".to_string()),
        )
        .expect("UPLOAD_DAYS must be an integer between 0 and 3660");
        let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (16 * 1024 * 1024).to_string())
            .parse::<usize>()
            .expect("MAX_UPLOAD_BYTES must be a valid usize integer");

        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env { secret_key, upload_dir, upload_days, max_upload_bytes, ip, port }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
