use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client, Collection,
};

use crate::config::AppConfig;

/// Shared application state: one long-lived client plus the two collection
/// handles the API serves, cloned into handlers through axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub foods: Collection<Document>,
    pub purchases: Collection<Document>,
}

impl AppState {
    /// Connect to MongoDB and resolve the collections.
    ///
    /// Pings the deployment before the server accepts traffic, so a bad URI
    /// or unreachable cluster fails at startup instead of on first request.
    pub async fn connect(config: &AppConfig) -> mongodb::error::Result<Self> {
        let options = ClientOptions::parse(&config.database.uri).await?;
        let client = Client::with_options(options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;

        let foods = client
            .database(&config.database.food_db)
            .collection::<Document>("foods");
        let purchases = client
            .database(&config.database.purchase_db)
            .collection::<Document>("purchase");

        Ok(Self {
            client,
            foods,
            purchases,
        })
    }
}
