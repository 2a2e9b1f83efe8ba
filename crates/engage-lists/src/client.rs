//! The Engage API client: one method per operation plus an enum dispatcher.

use tracing::{debug, instrument};

use engage_client::{ClientConfig, Error, ErrorKind, HttpTransport, Result, SessionManager};

use crate::envelope::RequestEnvelope;
use crate::ops::{Operation, OperationName, Outcome};
use crate::response::{parse_document, ApiResponse};
use crate::table::TableRows;
use crate::types::{ColumnDescriptor, ListDescriptor};

/// Client for the Engage list-management XML API.
///
/// Owns the session for its lifetime. Operations are strictly
/// sequential: each performs one round trip, or two when the implicit
/// login has not happened yet. Nothing is retried, and a half-completed
/// bulk upsert is the server's to resolve, not ours.
#[derive(Debug)]
pub struct EngageClient {
    config: ClientConfig,
    transport: HttpTransport,
    session: SessionManager,
}

impl EngageClient {
    /// Build a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            config,
            transport,
            session: SessionManager::new(),
        })
    }

    /// The held session token, if a login has happened.
    pub fn session_token(&self) -> Option<String> {
        self.session.token()
    }

    /// Perform the login exchange and store the resulting token.
    ///
    /// Called implicitly by the first non-login operation; calling it
    /// again replaces the held token.
    #[instrument(skip(self))]
    pub async fn login(&self) -> Result<()> {
        let request = RequestEnvelope::new(OperationName::Login)
            .field("USERNAME", self.config.username.as_str())
            .field("PASSWORD", self.config.password.as_str())
            .to_xml()?;
        let body = self.exchange(OperationName::Login, request).await?;
        let doc = parse_document(&body)?;
        let response = ApiResponse::new(&doc)?;
        response.validate()?;

        let token = response.result_text("SESSIONID").map_err(|e| Error {
            kind: ErrorKind::Authentication("login response carried no session id".into()),
            source: e.source,
        })?;
        self.session.store(token)?;
        debug!("session established");
        Ok(())
    }

    /// Ensure a session exists, performing the implicit login if needed.
    async fn ensure_session(&self) -> Result<()> {
        if !self.session.is_established() {
            Box::pin(self.login()).await?;
        }
        Ok(())
    }

    /// Send one request envelope and return the raw response body.
    ///
    /// Non-login requests are guaranteed a token before the URL is
    /// decorated; the login request itself goes to the bare URL.
    async fn exchange(&self, operation: OperationName, request: String) -> Result<String> {
        if !operation.is_login() {
            self.ensure_session().await?;
        }
        let url = self
            .session
            .decorate(&self.config.base_url, operation.is_login())?;
        debug!(operation = %operation, "dispatching request");
        self.transport.post_xml(&url, request).await
    }

    /// List the account's contact lists, or its relational tables.
    #[instrument(skip(self))]
    pub async fn get_lists(&self, relational: bool) -> Result<Vec<ListDescriptor>> {
        let list_type = if relational { "15" } else { "2" };
        let request = RequestEnvelope::new(OperationName::GetLists)
            .field("VISIBILITY", "1")
            .field("LIST_TYPE", list_type)
            .to_xml()?;
        let body = self.exchange(OperationName::GetLists, request).await?;
        let doc = parse_document(&body)?;
        let response = ApiResponse::new(&doc)?;
        response.validate()?;
        response.lists()
    }

    /// Column metadata for one list, in document order.
    #[instrument(skip(self))]
    pub async fn get_list_meta_data(&self, list_id: &str) -> Result<Vec<ColumnDescriptor>> {
        let request = RequestEnvelope::new(OperationName::GetListMetaData)
            .field("LIST_ID", list_id)
            .to_xml()?;
        let body = self.exchange(OperationName::GetListMetaData, request).await?;
        let doc = parse_document(&body)?;
        let response = ApiResponse::new(&doc)?;
        response.validate()?;
        response.columns()
    }

    /// Kick off a full CSV export; returns the remote path of the file on
    /// the download site.
    #[instrument(skip(self))]
    pub async fn export_list(&self, list_id: &str) -> Result<String> {
        let request = RequestEnvelope::new(OperationName::ExportList)
            .field("LIST_ID", list_id)
            .field("EXPORT_TYPE", "ALL")
            .field("EXPORT_FORMAT", "CSV")
            .field("FILE_ENCODING", "utf-8")
            .to_xml()?;
        let body = self.exchange(OperationName::ExportList, request).await?;
        let doc = parse_document(&body)?;
        let response = ApiResponse::new(&doc)?;
        response.validate()?;
        response.result_text("FILE_PATH")
    }

    /// Bulk upsert rows into a relational table.
    ///
    /// `records` is raw tabular input whose first record is the header.
    /// Returns the number of data rows sent.
    #[instrument(skip(self, records))]
    pub async fn insert_update_relational_table(
        &self,
        list_id: &str,
        records: Vec<Vec<String>>,
    ) -> Result<usize> {
        let table = TableRows::from_records(records)?;
        let count = table.row_count();
        let request = table.to_xml(list_id);
        let body = self
            .exchange(OperationName::InsertUpdateRelationalTable, request)
            .await?;
        let doc = parse_document(&body)?;
        let response = ApiResponse::new(&doc)?;
        response.validate()?;
        Ok(count)
    }

    /// Run one operation and wrap its result.
    pub async fn dispatch(&self, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::GetLists { relational } => {
                self.get_lists(relational).await.map(Outcome::Lists)
            }
            Operation::GetListMetaData { list_id } => self
                .get_list_meta_data(&list_id)
                .await
                .map(Outcome::Columns),
            Operation::ExportList { list_id } => {
                self.export_list(&list_id).await.map(Outcome::ExportedFile)
            }
            Operation::InsertUpdateRelationalTable { list_id, records } => self
                .insert_update_relational_table(&list_id, records)
                .await
                .map(Outcome::RowsUpserted),
        }
    }
}
