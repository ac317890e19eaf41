use std::net::SocketAddr;

use hangroom::config::Config;
use once_cell::sync::Lazy;
use tokio::net::TcpListener;

use super::test_player::TestPlayer;

// Set TEST_LOG to see the server logs while running the tests
static SETUP: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        std_logger::Config::logfmt().init();
    }
    hangroom::metrics::register_metrics();
});

pub struct TestApp {
    pub base_address: String,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        TestApp::spawn_app_with(|_| {}).await
    }

    pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
        Lazy::force(&SETUP);

        // Binding to port 0 triggers an OS scan for an available port, this way we can run tests in parallel where each runs its own application
        let random_port_address = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to bind random port.");
        let address = listener.local_addr().unwrap();
        std::env::set_var("ENVIRONMENT", "dev");
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            configure(&mut config);
            config
        };

        let server = hangroom::startup::create_web_server(config, listener);
        let _ = tokio::spawn(server);

        TestApp {
            base_address: format!("127.0.0.1:{}", address.port()),
        }
    }

    pub async fn connect_player(&self) -> TestPlayer {
        TestPlayer::connect(&format!("ws://{}/ws", self.base_address)).await
    }

    /// A host with a fresh room and a guest already joined to it, with the join events consumed.
    pub async fn host_and_guest(&self, word: &str) -> (TestPlayer, TestPlayer, String) {
        let mut host = self.connect_player().await;
        let room_id = host.create_room(None, word, None).await;

        let mut guest = self.connect_player().await;
        guest.join_room(&room_id).await;
        host.receive_player_joined().await;

        (host, guest, room_id)
    }
}
