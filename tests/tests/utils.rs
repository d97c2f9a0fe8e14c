use bankload_gateway::{GatewayConfig, HttpClientConfig};
use mock_gateway::MockConfig;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;
use tracing::error;
use tracing_subscriber::FmtSubscriber;
use url::Url;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter("bankload=debug,bankload_gateway=debug,mock_gateway=debug")
            .with_test_writer()
            .try_init();
    });
}

/// A mock gateway on its own port with a private dumps directory.
#[allow(unused)]
pub struct TestGateway {
    pub config: GatewayConfig,
    _dumps: TempDir,
}

#[allow(unused)]
pub async fn spawn_gateway(mock: MockConfig) -> TestGateway {
    init();

    let addr = mock_gateway::spawn(mock).await.unwrap();
    let dumps = tempfile::tempdir().unwrap();
    let config = GatewayConfig {
        http: HttpClientConfig {
            url: Url::parse(&format!("http://{addr}")).unwrap(),
            timeout: Duration::from_secs(5),
        },
        dumps_dir: dumps.path().to_path_buf(),
        ..GatewayConfig::default()
    };

    TestGateway {
        config,
        _dumps: dumps,
    }
}
