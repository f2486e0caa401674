use std::sync::OnceLock;

use mongodb::{options::ClientOptions, Client, Database};

static CLIENT: OnceLock<Client> = OnceLock::new();
static DB_NAME: OnceLock<String> = OnceLock::new();

pub struct MongoDBClient;

#[allow(non_upper_case_globals)]
pub static MongoDB: MongoDBClient = MongoDBClient;

impl MongoDBClient {
    /// Establishes the process wide client. Called once from `main` before
    /// the server starts accepting requests.
    pub async fn init(&self, uri: &str, db_name: &str) -> mongodb::error::Result<()> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;

        CLIENT.set(client).ok();
        DB_NAME.set(db_name.to_string()).ok();

        Ok(())
    }

    pub fn connect(&self) -> Database {
        let client = CLIENT.get().expect("mongo client not initialized");
        let db_name = DB_NAME.get().expect("mongo database name not initialized");

        client.database(db_name)
    }
}
