use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use issuenav_core::models::{FacetValues, FilterMetadata, Issue, SearchPage};
use issuenav_core::{Controller, ControllerError, Messages, ScreenContext, Settings};

const FILTERS_PATH: &str = "/api/issue_filters/app";
const SEARCH_PATH: &str = "/api/issues/search";
const MESSAGES_PATH: &str = "/api/l10n/index";

/// Response from the issue search API
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<Issue>,
    #[serde(default)]
    facets: Vec<FacetValues>,
    #[serde(default)]
    paging: PagingResponse,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PagingResponse {
    page_index: u32,
    page_size: u32,
    total: u64,
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        SearchPage {
            issues: response.issues,
            facets: response.facets,
            page_index: response.paging.page_index,
            page_size: response.paging.page_size,
            total: response.paging.total,
        }
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    params: &[(String, String)],
) -> Result<T, ControllerError> {
    debug!(url, params = params.len(), "GET");

    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| ControllerError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ControllerError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.json().await.map_err(|e| ControllerError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Load the localized message bundle. Used as the startup gate.
pub async fn request_messages(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Messages, ControllerError> {
    let messages: Messages = get_json(client, &join_url(base_url, MESSAGES_PATH), &[]).await?;
    debug!(entries = messages.len(), "Loaded messages");
    Ok(messages)
}

/// Issue screen controller backed by the server's web API
pub struct HttpController {
    client: reqwest::Client,
    base_url: String,
    screen: ScreenContext,
    sort: String,
    ascending: bool,
}

impl HttpController {
    pub fn new(client: reqwest::Client, screen: ScreenContext, settings: &Settings) -> Self {
        Self {
            client,
            base_url: settings.server_url.clone(),
            screen,
            sort: settings.sort.clone(),
            ascending: settings.ascending,
        }
    }

    /// Fetch permissions and favourite filters into the screen
    pub async fn load_filters(&self) -> Result<(), ControllerError> {
        let metadata: FilterMetadata =
            get_json(&self.client, &join_url(&self.base_url, FILTERS_PATH), &[]).await?;
        self.screen.apply_filter_metadata(metadata);
        Ok(())
    }

    /// Fetch the first page, or the page after the last loaded one
    pub async fn load_list(&self, first_page: bool) -> Result<(), ControllerError> {
        let Some(params) = self.list_params(first_page) else {
            debug!("All issues already loaded");
            return Ok(());
        };
        let response: SearchResponse =
            get_json(&self.client, &join_url(&self.base_url, SEARCH_PATH), &params).await?;
        self.screen.apply_search_page(response.into(), first_page);
        Ok(())
    }

    /// Query parameters for a search request, or `None` when a next page
    /// was asked for but every issue is already loaded.
    pub fn list_params(&self, first_page: bool) -> Option<Vec<(String, String)>> {
        let state = self.screen.state().read();
        let paging = state.paging();
        let page = if first_page {
            1
        } else if paging.max_results_reached() {
            return None;
        } else {
            paging.page + 1
        };

        let mut params: Vec<(String, String)> = state.search_params().into_iter().collect();
        params.push(("p".to_string(), page.to_string()));
        params.push(("ps".to_string(), paging.page_size.to_string()));
        params.push(("s".to_string(), self.sort.clone()));
        params.push(("asc".to_string(), self.ascending.to_string()));
        params.push(("additionalFields".to_string(), "_all".to_string()));
        Some(params)
    }
}

#[async_trait(?Send)]
impl Controller for HttpController {
    async fn fetch_filters(&self) -> Result<(), ControllerError> {
        self.load_filters().await
    }

    async fn fetch_list(&self, first_page: bool) -> Result<(), ControllerError> {
        self.load_list(first_page).await
    }
}
