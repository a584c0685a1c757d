use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "copy-generator")]
#[command(about = "Slogan and ad copy generator backed by Gemini")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Base url of the generative language API
    #[arg(
        long,
        env = "GEMINI_API_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub api_url: String,

    // Model used for both generators
    #[arg(short, long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub model: String,

    // API key, sent as x-goog-api-key when not empty
    #[arg(long, env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,
}
