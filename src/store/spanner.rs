use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    GetDatabaseDdlRequest, UpdateDatabaseDdlRequest,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig, Error as ClientError};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert_or_update};
use gcloud_spanner::statement::Statement;
use std::sync::Arc;

use super::{ItemStore, StoreError, StoreResult};
use crate::config::SpannerConfig;
use crate::models::Item;

/// Item store backed by a Cloud Spanner table
///
/// Cloning is cheap; all clones share one session pool.
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
    table: String,
}

impl SpannerStore {
    /// Connect to the configured database.
    ///
    /// The gcloud-spanner library picks up `SPANNER_EMULATOR_HOST` on its own
    /// and talks to the emulator when it is set.
    ///
    /// With auto-provisioning enabled the items table is created first when
    /// the database lacks it. With it disabled a missing table is
    /// only discovered by the first request, which then answers 404.
    pub async fn from_config(config: &SpannerConfig, table: &str) -> Result<Self> {
        if config.auto_provision {
            auto_provision(config, table).await?;
        } else {
            tracing::info!("Auto-provisioning disabled, expecting table '{}' to exist", table);
        }

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
            table: table.to_string(),
        })
    }

    /// Run a query selecting `id` and `name` and collect every row.
    async fn query_items(&self, statement: Statement, context: &str) -> StoreResult<Vec<Item>> {
        let mut tx = self
            .inner
            .single()
            .await
            .map_err(|e| store_error(e, "Failed to create read transaction"))?;

        let mut result_set = tx
            .query(statement)
            .await
            .map_err(|e| store_error(e, context))?;

        let mut items = Vec::new();
        while let Some(row) = result_set.next().await.map_err(|e| store_error(e, context))? {
            let id: String = row
                .column_by_name("id")
                .context("Failed to read id column")?;
            let name: String = row
                .column_by_name("name")
                .context("Failed to read name column")?;
            items.push(Item { id, name });
        }

        Ok(items)
    }

    /// Write `id` and `name` columns, inserting the row when absent
    async fn upsert(&self, id: &str, name: &str, context: &str) -> StoreResult<()> {
        let id = id.to_string();
        let name = name.to_string();
        let mutation = insert_or_update(&self.table, &["id", "name"], &[&id, &name]);

        self.inner
            .apply(vec![mutation])
            .await
            .map_err(|e| store_error(e, context))?;

        Ok(())
    }
}

#[async_trait]
impl ItemStore for SpannerStore {
    async fn put(&self, item: &Item) -> StoreResult<()> {
        self.upsert(&item.id, &item.name, "Failed to put item to Spanner")
            .await?;

        tracing::debug!("Put item with id: {}", item.id);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        let mut statement = Statement::new(format!(
            "SELECT id, name FROM {} WHERE id = @id",
            self.table
        ));
        statement.add_param("id", &id.to_string());

        let item = self
            .query_items(statement, "Failed to query item from Spanner")
            .await?
            .into_iter()
            .next();

        match &item {
            Some(_) => tracing::debug!("Read item with id: {}", id),
            None => tracing::debug!("Item not found with id: {}", id),
        }
        Ok(item)
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        let statement = Statement::new(format!("SELECT id, name FROM {}", self.table));

        let items = self
            .query_items(statement, "Failed to scan items from Spanner")
            .await?;

        tracing::debug!("Scanned {} items", items.len());
        Ok(items)
    }

    async fn update(&self, id: &str, name: &str) -> StoreResult<Item> {
        // insert_or_update only touches the listed columns
        self.upsert(id, name, "Failed to update item in Spanner")
            .await?;

        tracing::debug!("Updated item with id: {}", id);
        Ok(Item {
            id: id.to_string(),
            name: name.to_string(),
        })
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mutation = delete(&self.table, Key::new(&id.to_string()));

        self.inner
            .apply(vec![mutation])
            .await
            .map_err(|e| store_error(e, "Failed to delete item from Spanner"))?;

        tracing::debug!("Deleted item with id: {}", id);
        Ok(())
    }

    /// Executes `SELECT 1` to prove the session pool can reach the database.
    async fn health_check(&self) -> StoreResult<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .map_err(|e| store_error(e, "Failed to create health check transaction"))?;

        let mut result_set = tx
            .query(statement)
            .await
            .map_err(|e| store_error(e, "Failed to execute health check query"))?;

        if result_set
            .next()
            .await
            .map_err(|e| store_error(e, "Failed to read health check result"))?
            .is_some()
        {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results").into())
        }
    }
}

/// Translate a Spanner failure into the store's error kinds.
///
/// Spanner reports a missing table as `NOT_FOUND` on mutations and as
/// `INVALID_ARGUMENT` on queries, both with "Table not found: ..." in the
/// message. Other `NOT_FOUND`s, such as an expired session, stay `Other`.
fn store_error<E>(err: E, context: &str) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let source: &(dyn std::error::Error + 'static) = &err;
    let status = match source.downcast_ref::<ClientError>() {
        Some(ClientError::GRPC(status)) => Some(status),
        _ => source.downcast_ref::<Status>(),
    };

    if let Some(status) = status {
        if is_missing_table(status) {
            return StoreError::TableNotFound(format!("{}: {}", context, status.message()));
        }
    }

    StoreError::Other(anyhow::Error::new(err).context(context.to_string()))
}

fn is_missing_table(status: &Status) -> bool {
    let message = status.message();
    match status.code() {
        Code::NotFound => {
            message.contains("Table not found") || message.contains("Database not found")
        }
        Code::InvalidArgument => message.contains("Table not found"),
        _ => false,
    }
}

/// Create the items table when the database does not have it yet
///
/// The instance and database must already exist.
async fn auto_provision(config: &SpannerConfig, table: &str) -> Result<()> {
    tracing::info!("Checking that table '{}' exists...", table);

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    ensure_table_exists(&admin_client, &config.database_path(), table).await
}

async fn ensure_table_exists(
    admin_client: &AdminClient,
    database_path: &str,
    table: &str,
) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let plain = format!("CREATE TABLE {} ", table);
    let quoted = format!("CREATE TABLE `{}`", table);
    let table_exists = ddl_response
        .into_inner()
        .statements
        .iter()
        .any(|stmt| stmt.starts_with(&plain) || stmt.starts_with(&quoted));

    if table_exists {
        tracing::info!("Table '{}' already exists", table);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", table);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![items_table_ddl(table)],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created successfully", table);
    Ok(())
}

fn items_table_ddl(table: &str) -> String {
    format!(
        "CREATE TABLE {} (\n    id STRING(36) NOT NULL,\n    name STRING(MAX) NOT NULL,\n) PRIMARY KEY (id)",
        table
    )
}
