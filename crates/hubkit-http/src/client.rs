//! Typed operations on the content API.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use hubkit_core::envelope::{decode_collection, decode_record};
use hubkit_core::error::{DecodeError, InvalidInputError};
use hubkit_core::pagination::{ListQuery, PaginationError, collect_all_async};
use hubkit_core::patch::{PatchResult, compute_patch, compute_update};
use hubkit_core::resources::{
    AssignedContentType, ContentItem, ContentItemInput, ContentRepository, ContentType,
    ContentTypeInput, ContentTypeSchema, ContentTypeSchemaInput, Folder, FolderInput, Hub,
    SearchIndex, SearchIndexInput, SearchIndexSettings, Webhook, WebhookInput,
};
use hubkit_core::traits::{Method, Transport};
use hubkit_core::{Collection, DecodeOptions, Error, Resource, Result, Updatable};

use crate::config::ClientConfig;
use crate::endpoints::{self, ArchiveRequest, AssignContentTypeRequest};
use crate::stream::{ItemPages, stream_all};
use crate::transport::HttpTransport;

/// Outcome of an update through the patch engine.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<R> {
    /// The record already matched; nothing was sent.
    Unchanged(R),
    /// A patch was sent; holds the record returned by the server.
    Updated(R),
}

impl<R> UpdateOutcome<R> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, UpdateOutcome::Unchanged(_))
    }

    pub fn into_record(self) -> R {
        match self {
            UpdateOutcome::Unchanged(record) | UpdateOutcome::Updated(record) => record,
        }
    }
}

/// Outcome of draining every page of a listing.
///
/// On failure the error keeps the items of the pages fetched so far.
pub type ListAllResult<R> = std::result::Result<Vec<R>, PaginationError<R, Error>>;

/// Client for the content API.
///
/// Generic over the [`Transport`] so that tests can swap the network out.
/// Cloning is cheap; clones share the transport.
pub struct ContentClient<T = HttpTransport> {
    transport: Arc<T>,
    options: DecodeOptions,
}

impl<T> Clone for ContentClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            options: self.options,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ContentClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentClient")
            .field("transport", &self.transport)
            .field("options", &self.options)
            .finish()
    }
}

impl ContentClient<HttpTransport> {
    /// Create a client talking HTTPS to the configured API.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ContentClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            options: DecodeOptions::default(),
        }
    }

    /// Replace the options used to decode every response.
    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn decode_options(&self) -> &DecodeOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Generic building blocks
    // ------------------------------------------------------------------

    /// Fetch a single record.
    pub async fn fetch<R: Resource>(&self, endpoint: &str) -> Result<R> {
        let body = self.transport.get(endpoint).await?;
        Ok(decode_record(&body, &self.options)?)
    }

    /// Fetch one page of a listing.
    pub async fn fetch_page<R: Resource>(
        &self,
        endpoint: &str,
        query: &ListQuery,
    ) -> Result<Collection<R>> {
        let endpoint = endpoints::with_query(endpoint, &query.to_query_string());
        let body = self.transport.get(&endpoint).await?;
        Ok(decode_collection(&body, &self.options)?)
    }

    /// Fetch every page of a listing, starting at page 0.
    #[instrument(skip(self, query))]
    pub async fn fetch_all<R: Resource>(
        &self,
        endpoint: &str,
        query: &ListQuery,
    ) -> ListAllResult<R> {
        let items = collect_all_async(|page| {
            let query = query.at_page(page);
            async move {
                debug!(page, "fetching page");
                self.fetch_page::<R>(endpoint, &query).await
            }
        })
        .await?;

        debug!(count = items.len(), "listing drained");
        Ok(items)
    }

    /// Stream every item of a listing, fetching pages on demand.
    pub fn stream_all<R>(&self, endpoint: &str, query: ListQuery) -> ItemPages<R>
    where
        R: Resource + Send + 'static,
        T: 'static,
    {
        let client = self.clone();
        let endpoint = endpoint.to_string();

        stream_all(move |page| {
            let client = client.clone();
            let endpoint = endpoint.clone();
            let query = query.at_page(page);
            async move { client.fetch_page::<R>(&endpoint, &query).await }
        })
    }

    async fn send_json<R, B>(&self, method: Method, endpoint: &str, body: &B) -> Result<R>
    where
        R: Resource,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(|e| InvalidInputError::Other {
            message: format!("cannot serialize request body: {e}"),
        })?;
        let response = self.transport.send(method, endpoint, Some(body)).await?;
        Ok(decode_record(&response, &self.options)?)
    }

    async fn send_empty<R: Resource>(&self, method: Method, endpoint: &str) -> Result<R> {
        let response = self.transport.send(method, endpoint, None).await?;
        Ok(decode_record(&response, &self.options)?)
    }

    /// PATCH `endpoint` so that `current` becomes `desired`.
    ///
    /// Nothing is sent when the two are equal, and `current` comes back as
    /// [`UpdateOutcome::Unchanged`].
    pub async fn update_record<R>(
        &self,
        endpoint: &str,
        current: &R,
        desired: &R::Input,
    ) -> Result<UpdateOutcome<R>>
    where
        R: Updatable + Clone,
    {
        match compute_update(current, desired)? {
            PatchResult::NoChange => {
                debug!(endpoint, "no change, skipping update");
                Ok(UpdateOutcome::Unchanged(current.clone()))
            }
            PatchResult::Patch(patch) => {
                let response = self.transport.send(Method::Patch, endpoint, Some(patch)).await?;
                Ok(UpdateOutcome::Updated(decode_record(&response, &self.options)?))
            }
        }
    }

    async fn update<R>(&self, endpoint: &str, current: &R, desired: &R::Input) -> Result<R>
    where
        R: Updatable + Clone,
    {
        self.update_record(endpoint, current, desired)
            .await
            .map(UpdateOutcome::into_record)
    }

    /// Follow a link relation of a record.
    async fn follow<R: Resource>(&self, links: &hubkit_core::Links, relation: &str) -> Result<R> {
        let link = links.get(relation).ok_or_else(|| InvalidInputError::MissingLink {
            relation: relation.to_string(),
        })?;
        self.fetch(&link.href).await
    }

    // ------------------------------------------------------------------
    // Hubs
    // ------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn hub_list(&self, query: &ListQuery) -> Result<Collection<Hub>> {
        self.fetch_page(endpoints::HUBS, query).await
    }

    pub async fn hub_list_all(&self) -> ListAllResult<Hub> {
        self.fetch_all(endpoints::HUBS, &ListQuery::new()).await
    }

    #[instrument(skip(self))]
    pub async fn hub_get(&self, id: &str) -> Result<Hub> {
        self.fetch(&endpoints::hub(id)).await
    }

    // ------------------------------------------------------------------
    // Content repositories
    // ------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn repository_get(&self, id: &str) -> Result<ContentRepository> {
        self.fetch(&endpoints::repository(id)).await
    }

    #[instrument(skip(self))]
    pub async fn repository_list(
        &self,
        hub_id: &str,
        query: &ListQuery,
    ) -> Result<Collection<ContentRepository>> {
        self.fetch_page(&endpoints::hub_repositories(hub_id), query).await
    }

    pub async fn repository_list_all(&self, hub_id: &str) -> ListAllResult<ContentRepository> {
        self.fetch_all(&endpoints::hub_repositories(hub_id), &ListQuery::new()).await
    }

    /// Make a content type available in a repository.
    #[instrument(skip(self))]
    pub async fn repository_assign_content_type(
        &self,
        repository_id: &str,
        content_type_id: &str,
    ) -> Result<ContentRepository> {
        let request = AssignContentTypeRequest { content_type_id };
        self.send_json(
            Method::Post,
            &endpoints::repository_content_types(repository_id),
            &request,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn repository_remove_content_type(
        &self,
        repository_id: &str,
        content_type_id: &str,
    ) -> Result<ContentRepository> {
        self.send_empty(
            Method::Delete,
            &endpoints::repository_content_type(repository_id, content_type_id),
        )
        .await
    }

    /// The hub a repository belongs to, via its `hub` link.
    pub async fn repository_hub(&self, repository: &ContentRepository) -> Result<Hub> {
        self.follow(&repository.links, "hub").await
    }

    // ------------------------------------------------------------------
    // Content types
    // ------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn content_type_create(
        &self,
        hub_id: &str,
        input: &ContentTypeInput,
    ) -> Result<ContentType> {
        self.send_json(Method::Post, &endpoints::hub_content_types(hub_id), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn content_type_get(&self, id: &str) -> Result<ContentType> {
        self.fetch(&endpoints::content_type(id)).await
    }

    #[instrument(skip(self, current, input), fields(id = %current.id))]
    pub async fn content_type_update(
        &self,
        current: &ContentType,
        input: &ContentTypeInput,
    ) -> Result<ContentType> {
        self.update(&endpoints::content_type(&current.id), current, input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn content_type_list(
        &self,
        hub_id: &str,
        query: &ListQuery,
    ) -> Result<Collection<ContentType>> {
        self.fetch_page(&endpoints::hub_content_types(hub_id), query).await
    }

    pub async fn content_type_list_all(&self, hub_id: &str) -> ListAllResult<ContentType> {
        self.fetch_all(&endpoints::hub_content_types(hub_id), &ListQuery::new()).await
    }

    #[instrument(skip(self))]
    pub async fn content_type_archive(&self, id: &str) -> Result<ContentType> {
        self.send_empty(Method::Post, &endpoints::archive(&endpoints::content_type(id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn content_type_unarchive(&self, id: &str, version: u32) -> Result<ContentType> {
        self.send_json(
            Method::Post,
            &endpoints::unarchive(&endpoints::content_type(id)),
            &ArchiveRequest { version },
        )
        .await
    }

    // ------------------------------------------------------------------
    // Content type schemas
    // ------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn schema_create(
        &self,
        hub_id: &str,
        input: &ContentTypeSchemaInput,
    ) -> Result<ContentTypeSchema> {
        self.send_json(Method::Post, &endpoints::hub_schemas(hub_id), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn schema_get(&self, id: &str) -> Result<ContentTypeSchema> {
        self.fetch(&endpoints::schema(id)).await
    }

    #[instrument(skip(self, current, input), fields(id = %current.id))]
    pub async fn schema_update(
        &self,
        current: &ContentTypeSchema,
        input: &ContentTypeSchemaInput,
    ) -> Result<ContentTypeSchema> {
        self.update(&endpoints::schema(&current.id), current, input).await
    }

    #[instrument(skip(self))]
    pub async fn schema_list(
        &self,
        hub_id: &str,
        query: &ListQuery,
    ) -> Result<Collection<ContentTypeSchema>> {
        self.fetch_page(&endpoints::hub_schemas(hub_id), query).await
    }

    pub async fn schema_list_all(&self, hub_id: &str) -> ListAllResult<ContentTypeSchema> {
        self.fetch_all(&endpoints::hub_schemas(hub_id), &ListQuery::new()).await
    }

    #[instrument(skip(self))]
    pub async fn schema_archive(&self, id: &str, version: u32) -> Result<ContentTypeSchema> {
        self.send_json(
            Method::Post,
            &endpoints::archive(&endpoints::schema(id)),
            &ArchiveRequest { version },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn schema_unarchive(&self, id: &str, version: u32) -> Result<ContentTypeSchema> {
        self.send_json(
            Method::Post,
            &endpoints::unarchive(&endpoints::schema(id)),
            &ArchiveRequest { version },
        )
        .await
    }

    // ------------------------------------------------------------------
    // Content items
    // ------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn item_get(&self, id: &str) -> Result<ContentItem> {
        self.fetch(&endpoints::item(id)).await
    }

    /// One page of a repository's items.
    ///
    /// Unless the query sets a size or asks for the `basic` projection, the
    /// page size defaults to
    /// [`DEFAULT_ITEM_PAGE_SIZE`](hubkit_core::pagination::DEFAULT_ITEM_PAGE_SIZE).
    #[instrument(skip(self))]
    pub async fn item_list(
        &self,
        repository_id: &str,
        query: &ListQuery,
    ) -> Result<Collection<ContentItem>> {
        let query = query.clone().with_item_defaults();
        self.fetch_page(&endpoints::repository_items(repository_id), &query)
            .await
    }

    pub async fn item_list_all(
        &self,
        repository_id: &str,
        query: &ListQuery,
    ) -> ListAllResult<ContentItem> {
        let query = query.clone().with_item_defaults();
        self.fetch_all(&endpoints::repository_items(repository_id), &query)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn item_create(
        &self,
        repository_id: &str,
        input: &ContentItemInput,
    ) -> Result<ContentItem> {
        self.send_json(Method::Post, &endpoints::repository_items(repository_id), input)
            .await
    }

    #[instrument(skip(self, current, input), fields(id = %current.id))]
    pub async fn item_update(
        &self,
        current: &ContentItem,
        input: &ContentItemInput,
    ) -> Result<ContentItem> {
        self.update(&endpoints::item(&current.id), current, input).await
    }

    #[instrument(skip(self))]
    pub async fn item_archive(&self, id: &str, version: u32) -> Result<ContentItem> {
        self.send_json(
            Method::Post,
            &endpoints::archive(&endpoints::item(id)),
            &ArchiveRequest { version },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn item_unarchive(&self, id: &str, version: u32) -> Result<ContentItem> {
        self.send_json(
            Method::Post,
            &endpoints::unarchive(&endpoints::item(id)),
            &ArchiveRequest { version },
        )
        .await
    }

    // ------------------------------------------------------------------
    // Folders
    // ------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn folder_create(&self, repository_id: &str, input: &FolderInput) -> Result<Folder> {
        self.send_json(Method::Post, &endpoints::repository_folders(repository_id), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn folder_get(&self, id: &str) -> Result<Folder> {
        self.fetch(&endpoints::folder(id)).await
    }

    #[instrument(skip(self))]
    pub async fn folder_list(
        &self,
        repository_id: &str,
        query: &ListQuery,
    ) -> Result<Collection<Folder>> {
        self.fetch_page(&endpoints::repository_folders(repository_id), query)
            .await
    }

    pub async fn folder_list_all(&self, repository_id: &str) -> ListAllResult<Folder> {
        self.fetch_all(&endpoints::repository_folders(repository_id), &ListQuery::new())
            .await
    }

    #[instrument(skip(self))]
    pub async fn folder_delete(&self, id: &str) -> Result<()> {
        self.transport
            .send(Method::Delete, &endpoints::folder(id), None)
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Webhooks
    // ------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn webhook_create(&self, hub_id: &str, input: &WebhookInput) -> Result<Webhook> {
        self.send_json(Method::Post, &endpoints::hub_webhooks(hub_id), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn webhook_get(&self, hub_id: &str, id: &str) -> Result<Webhook> {
        self.fetch(&endpoints::webhook(hub_id, id)).await
    }

    #[instrument(skip(self, current, input), fields(id = %current.id))]
    pub async fn webhook_update(
        &self,
        hub_id: &str,
        current: &Webhook,
        input: &WebhookInput,
    ) -> Result<Webhook> {
        self.update(&endpoints::webhook(hub_id, &current.id), current, input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn webhook_delete(&self, hub_id: &str, id: &str) -> Result<()> {
        self.transport
            .send(Method::Delete, &endpoints::webhook(hub_id, id), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn webhook_list(
        &self,
        hub_id: &str,
        query: &ListQuery,
    ) -> Result<Collection<Webhook>> {
        self.fetch_page(&endpoints::hub_webhooks(hub_id), query).await
    }

    pub async fn webhook_list_all(&self, hub_id: &str) -> ListAllResult<Webhook> {
        self.fetch_all(&endpoints::hub_webhooks(hub_id), &ListQuery::new()).await
    }

    // ------------------------------------------------------------------
    // Search indexes
    // ------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn search_index_create(
        &self,
        hub_id: &str,
        input: &SearchIndexInput,
    ) -> Result<SearchIndex> {
        self.send_json(Method::Post, &endpoints::search_indexes(hub_id), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_index_get(&self, hub_id: &str, id: &str) -> Result<SearchIndex> {
        self.fetch(&endpoints::search_index(hub_id, id)).await
    }

    /// Assigned content types in `input` are ignored; they are managed
    /// through their own endpoint.
    #[instrument(skip(self, current, input), fields(id = %current.id))]
    pub async fn search_index_update(
        &self,
        hub_id: &str,
        current: &SearchIndex,
        input: &SearchIndexInput,
    ) -> Result<SearchIndex> {
        let desired = input.for_update();
        self.update(&endpoints::search_index(hub_id, &current.id), current, &desired)
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_index_delete(&self, hub_id: &str, id: &str) -> Result<()> {
        self.transport
            .send(Method::Delete, &endpoints::search_index(hub_id, id), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn search_index_list(
        &self,
        hub_id: &str,
        query: &ListQuery,
    ) -> Result<Collection<SearchIndex>> {
        self.fetch_page(&endpoints::search_indexes(hub_id), query).await
    }

    pub async fn search_index_list_all(&self, hub_id: &str) -> ListAllResult<SearchIndex> {
        self.fetch_all(&endpoints::search_indexes(hub_id), &ListQuery::new()).await
    }

    #[instrument(skip(self))]
    pub async fn search_index_settings_get(
        &self,
        hub_id: &str,
        id: &str,
    ) -> Result<SearchIndexSettings> {
        let body = self
            .transport
            .get(&endpoints::search_index_settings(hub_id, id))
            .await?;
        decode_plain(&body)
    }

    /// Patch the settings of an index from `current` to `desired`.
    #[instrument(skip(self, current, desired))]
    pub async fn search_index_settings_update(
        &self,
        hub_id: &str,
        id: &str,
        current: &SearchIndexSettings,
        desired: &SearchIndexSettings,
    ) -> Result<SearchIndexSettings> {
        match compute_patch(current, desired)? {
            PatchResult::NoChange => Ok(current.clone()),
            PatchResult::Patch(patch) => {
                let body = self
                    .transport
                    .send(
                        Method::Patch,
                        &endpoints::search_index_settings(hub_id, id),
                        Some(patch),
                    )
                    .await?;
                decode_plain(&body)
            }
        }
    }

    /// The webhooks that keep an index in sync, one per assigned content
    /// type, found through each assignment's `webhook` link.
    #[instrument(skip(self))]
    pub async fn search_index_webhooks(&self, hub_id: &str, id: &str) -> Result<Vec<Webhook>> {
        let assigned: Collection<AssignedContentType> = self
            .fetch_page(
                &endpoints::search_index_assigned_content_types(hub_id, id),
                &ListQuery::new(),
            )
            .await?;

        let mut webhooks = Vec::with_capacity(assigned.items.len());
        for assignment in &assigned.items {
            webhooks.push(self.follow(&assignment.links, "webhook").await?);
        }
        Ok(webhooks)
    }
}

/// Decode a body that is not a HAL record.
fn decode_plain<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    serde_json::from_slice(body)
        .map_err(DecodeError::Envelope)
        .map_err(Error::from)
}
