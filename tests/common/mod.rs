//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use docs_server::config::DocsConfig;
use docs_server::content::ContentStore;
use docs_server::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Write a two-version content tree under `root`.
#[allow(dead_code)]
pub fn write_content(root: &Path) {
    fs::write(root.join("versions.yml"), "\"3.0\": \"3.0\"\n\"2.2\": \"2.2\"\n").unwrap();

    for version in ["3.0", "2.2"] {
        let dir = root.join(version);
        fs::create_dir_all(dir.join("pages/templates")).unwrap();

        fs::write(
            dir.join("menu_docs.yml"),
            format!(
                "- title: Basics {version}\n  children:\n    - title: Installation\n      slug: installation\n    - title: Cheatsheet\n      slug: cheatsheet\n- title: Templates\n  children:\n    - title: Twig primer\n      slug: templates/twig-primer\n"
            ),
        )
        .unwrap();
        fs::write(
            dir.join("pages/installation.html"),
            format!("---\ntitle: Installing Bolt {version}\n---\n<p>Install {version}.</p>\n"),
        )
        .unwrap();
        fs::write(
            dir.join("pages/templates/twig-primer.html"),
            "<p>Twig is a template language.</p>\n",
        )
        .unwrap();
        fs::write(dir.join("pages/blank.html"), "---\ntitle: Blank\n---\n").unwrap();
        fs::write(
            dir.join("class_reference.yml"),
            "Bolt\\Application:\n  description: The application container\n",
        )
        .unwrap();
        fs::write(
            dir.join("cheatsheet.yml"),
            "Twig:\n  - \"{{ record.title }}\"\n  - \"{{ dump() }}\"\n",
        )
        .unwrap();
    }
}

/// Start a server on an ephemeral port. Trigger the returned `Shutdown` to stop it.
pub async fn start_server(config: DocsConfig, store: Arc<dyn ContentStore>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (_, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::with_store(config, store);

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
