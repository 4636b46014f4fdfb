use crate::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_IMAGE: &str = "mysql";
const MYSQL_PORT: u16 = 3306;
const READY_MESSAGE: &str = "ready for connections";

/// Credentials and version of the disposable server.
#[derive(Debug, Clone, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "8.4".to_string(), setter(into))]
    tag: String,
    #[builder(default = "tickler".to_string(), setter(into))]
    database: String,
    #[builder(default = "tickler".to_string(), setter(into))]
    username: String,
    #[builder(default = "tickler".to_string(), setter(into))]
    password: String,
    #[builder(default = "root".to_string(), setter(into))]
    root_password: String,
}

impl MysqlConfig {
    fn image(&self) -> GenericImage {
        GenericImage::new(MYSQL_IMAGE, self.tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_MESSAGE))
    }

    fn url(&self, host: &str, port: u16) -> String {
        format!(
            "mysql://{}:{}@{host}:{port}/{}",
            self.username, self.password, self.database
        )
    }
}

/// A MySQL container holding an empty `database`, owned by `username`.
///
/// The DSN is resolved once at start-up. Dropping the server stops the
/// container.
pub struct MySqlServer {
    _container: ContainerAsync<GenericImage>,
    database_url: String,
}

impl MySqlServer {
    pub async fn new(config: MysqlConfig) -> Result<Self> {
        let container = config
            .image()
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", config.root_password.as_str())
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(MYSQL_PORT).await?;

        Ok(Self {
            database_url: config.url(&host, port),
            _container: container,
        })
    }

    /// `mysql://` DSN for the application user.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}
