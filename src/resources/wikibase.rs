use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use tracing::info;

use crate::domain::TraitRow;

pub const DEFAULT_ENDPOINT: &str = "https://reflora-traits-test.wikibase.cloud/query/sparql";
const DEFAULT_USER_AGENT: &str = "Reflora-Traits-Export/0.1 (+https://github.com/)";
const DEFAULT_LANGUAGE: &str = "pt";

#[derive(Debug, Clone)]
pub struct WikibaseQueryConfig {
    pub endpoint: String,
    pub language: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl WikibaseQueryConfig {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for WikibaseQueryConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WikibaseClient {
    client: HttpClient,
    config: WikibaseQueryConfig,
}

impl WikibaseClient {
    pub fn new(config: WikibaseQueryConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/sparql-results+json"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/sparql-query"),
        );

        let client = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("não foi possível criar o cliente HTTP para o wikibase")?;

        Ok(Self { client, config })
    }

    pub fn fetch_trait_rows(&self) -> Result<Vec<TraitRow>> {
        let query = trait_query(&self.config.language);

        // POST com a consulta no corpo, para evitar URLs longas
        let response = self
            .client
            .post(&self.config.endpoint)
            .body(query)
            .send()
            .with_context(|| format!("falha na chamada SPARQL para {}", self.config.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "resposta HTTP inválida do endpoint SPARQL (status {})",
                status
            ));
        }

        let parsed: SparqlResponse = response
            .json()
            .context("não foi possível analisar a resposta SPARQL do wikibase")?;
        let rows = parsed.into_rows();
        info!(rows = rows.len(), "consulta SPARQL concluída");
        Ok(rows)
    }
}

fn trait_query(language: &str) -> String {
    format!(
        r#"PREFIX wikibase: <http://wikiba.se/ontology#>
PREFIX wd: <https://reflora-traits-test.wikibase.cloud/entity/>
PREFIX wdt: <https://reflora-traits-test.wikibase.cloud/prop/direct/>
PREFIX p: <https://reflora-traits-test.wikibase.cloud/prop/>
PREFIX ps: <https://reflora-traits-test.wikibase.cloud/prop/statement/>
PREFIX pq: <https://reflora-traits-test.wikibase.cloud/prop/qualifier/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX schema: <http://schema.org/>

SELECT ?item ?itemLabel ?prop ?propLabel ?propDirect ?descriptor ?descriptorLabel ?value ?valueLabel ?image ?wikidataID
WHERE {{
  wd:Q13 wdt:P6 ?item .

  ?item ?propDirect ?descriptor .
  ?prop wikibase:directClaim ?propDirect .
  ?prop wikibase:claim ?p .
  ?prop wikibase:statementProperty ?ps .

  ?item ?p ?statement .
  ?statement ?ps ?descriptor .
  ?statement pq:P4 ?value .

  OPTIONAL {{ ?item wdt:P11 ?image }}

  OPTIONAL {{ ?item wdt:P12 ?wikidataID }}

  ?item rdfs:label ?itemLabel .
  FILTER(LANG(?itemLabel) = "{language}")

  ?descriptor rdfs:label ?descriptorLabel .
  FILTER(LANG(?descriptorLabel) = "{language}")

  ?value rdfs:label ?valueLabel .
  FILTER(LANG(?valueLabel) = "{language}")

  ?prop rdfs:label ?propLabel .
  FILTER(LANG(?propLabel) = "{language}")
}}
"#,
        language = language
    )
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

impl SparqlResponse {
    fn into_rows(self) -> Vec<TraitRow> {
        self.results.bindings.into_iter().map(TraitRow::from).collect()
    }
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<SparqlBinding>,
}

#[derive(Debug, Deserialize)]
struct SparqlBinding {
    item: SparqlValue,
    #[serde(rename = "itemLabel")]
    item_label: SparqlValue,
    #[serde(rename = "propLabel")]
    prop_label: SparqlValue,
    #[serde(rename = "descriptorLabel")]
    descriptor_label: SparqlValue,
    #[serde(rename = "valueLabel")]
    value_label: SparqlValue,
    #[serde(default)]
    image: Option<SparqlValue>,
    #[serde(rename = "wikidataID", default)]
    wikidata_id: Option<SparqlValue>,
}

impl From<SparqlBinding> for TraitRow {
    fn from(binding: SparqlBinding) -> Self {
        TraitRow {
            item_uri: binding.item.value,
            item_label: binding.item_label.value,
            property_label: binding.prop_label.value,
            descriptor_label: binding.descriptor_label.value,
            value_label: binding.value_label.value,
            image: binding.image.map(|v| v.value),
            wikidata_xref: binding.wikidata_id.map(|v| v.value),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    #[serde(rename = "type")]
    _value_type: String,
    value: String,
    #[serde(rename = "xml:lang", default)]
    _lang: Option<String>,
}
