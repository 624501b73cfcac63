use spam_rs::config::Config;
use spam_rs::dataset::Preprocessor;
use spam_rs::inference::SpamDetector;
use spam_rs::text::TextCleaner;
use spam_rs::trainer::{Trainer, TrainerConfig};
use spam_rs::web::WebServer;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::time::sleep;

pub const SPAM_EMAILS: &[&str] = &[
    "Congratulations! You are the WINNER of a FREE cash prize. Claim now at http://win.example",
    "Limited offer: cheap pills, free shipping, click here www.pills.biz",
    "Claim your lottery cash prize today, reply to prize@lottery.example",
    "<html><b>FREE</b> casino bonus cash, click to claim</html>",
    "You won a free cruise! Claim your prize, click the link",
    "Cheap loans, instant cash offer, act now",
];

pub const HAM_EMAILS: &[&str] = &[
    "Hi team, the project meeting is moved to Monday at 10am.",
    "Please review the attached quarterly report before Friday.",
    "Are we still on for lunch tomorrow? Let me know.",
    "Notes from the Monday meeting: budget review and project schedule.",
    "Reminder: the team retrospective is scheduled for Thursday.",
    "Can you send me the updated report for the project review?",
];

/// Test environment: a trained model and a running web server
pub struct TestEnv {
    pub base_url: String,
    pub config: Config,
    _workdir: TempDir,
}

impl TestEnv {
    /// Preprocess + train into a scratch directory and serve the result
    pub async fn start() -> Result<Self, String> {
        let workdir = TempDir::new().map_err(|e| e.to_string())?;
        let mut config = Config::default();
        config.paths.spam_dir = workdir.path().join("data/raw/spam");
        config.paths.ham_dir = workdir.path().join("data/raw/ham");
        config.paths.dataset_path = workdir.path().join("data/processed_data.csv");
        config.paths.model_path = workdir.path().join("model/spam_model.json");

        write_emails(&config.paths.spam_dir, "spam", SPAM_EMAILS)?;
        write_emails(&config.paths.ham_dir, "ham", HAM_EMAILS)?;

        println!("🧹 Preprocessing raw emails...");
        Preprocessor::new(TextCleaner::new(config.cleaner))
            .run(
                &config.paths.spam_dir,
                &config.paths.ham_dir,
                &config.paths.dataset_path,
            )
            .map_err(|e| e.to_string())?;

        println!("🏋️ Training model...");
        Trainer::new(TrainerConfig::from(&config))
            .train_from_file(&config.paths.dataset_path, &config.paths.model_path)
            .map_err(|e| e.to_string())?;

        let detector = SpamDetector::load(&config.paths.model_path).map_err(|e| e.to_string())?;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| e.to_string())?;
        let addr = listener.local_addr().map_err(|e| e.to_string())?;

        let server = WebServer::new(detector, addr.to_string());
        tokio::spawn(async move {
            if let Err(e) = server.run_with_listener(listener).await {
                tracing::error!("Web server exited: {}", e);
            }
        });

        let env = Self {
            base_url: format!("http://{}", addr),
            config,
            _workdir: workdir,
        };

        let health_url = format!("{}/health", env.base_url);
        env.wait_for_service(&health_url, 10).await?;
        println!("✅ Web server is ready at {}", env.base_url);

        Ok(env)
    }

    /// Wait for service to be ready
    pub async fn wait_for_service(&self, url: &str, timeout_secs: u64) -> Result<(), String> {
        let client = reqwest::Client::new();
        let start = std::time::Instant::now();

        loop {
            if start.elapsed().as_secs() > timeout_secs {
                return Err(format!("Timeout waiting for service: {}", url));
            }

            match client.get(url).send().await {
                Ok(_) => return Ok(()),
                Err(_) => {
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
}

fn write_emails(dir: &Path, prefix: &str, emails: &[&str]) -> Result<(), String> {
    std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    for (i, body) in emails.iter().enumerate() {
        std::fs::write(dir.join(format!("{}_{}.txt", prefix, i)), body)
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Test result for reporting
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub duration: Duration,
}

impl TestResult {
    pub fn success(name: String, duration: Duration) -> Self {
        Self {
            name,
            passed: true,
            message: "✅ Test passed".to_string(),
            duration,
        }
    }

    pub fn failure(name: String, message: String, duration: Duration) -> Self {
        Self {
            name,
            passed: false,
            message: format!("❌ Test failed: {}", message),
            duration,
        }
    }

    pub fn print(&self) {
        println!("\n{}", "=".repeat(80));
        println!("📝 Test: {}", self.name);
        println!("⏱️  Duration: {:?}", self.duration);
        println!("{}", self.message);
        println!("{}", "=".repeat(80));
    }
}
