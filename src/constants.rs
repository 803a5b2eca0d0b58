pub const DEFAULT_REPORT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_K: u32 = 0;
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];
pub const REPORT_FILE_NAME: &str = "structural_defect_report.txt";
pub const REPORT_MIME: &str = "text/plain";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const BIND_ADDR_ENV: &str = "REPORT_BIND_ADDR";
pub const OUTPUT_PATH_ENV: &str = "REPORT_OUTPUT_PATH";
pub const ENDPOINT_ENV: &str = "GEMINI_ENDPOINT";
