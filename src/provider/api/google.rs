use crate::provider::api::{CatalogClient, ClientError, SearchResult};
use serde::Deserialize;
use std::env;
use std::env::VarError;
use std::time::Duration;

/// 구글 북스 도서 검색 API 엔드포인트 URL
const VOLUME_SEARCH_ENDPOINT: &'static str = "https://www.googleapis.com/books/v1/volumes";
/// API 요청 시 기본 타임아웃 시간(초)
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 구글 북스 API에서 반환하는 산업 식별자 구조체
#[derive(Debug, Deserialize)]
pub struct IndustryIdentifier {
    /// 식별자 타입 (ISBN_10, ISBN_13 등)
    #[serde(rename = "type")]
    pub kind: String,
    /// 식별자 값
    #[serde(rename = "identifier")]
    pub identifier: String,
}

/// 구글 북스 API에서 반환하는 도서 정보 구조체
#[derive(Debug, Default, Deserialize)]
pub struct VolumeInfo {
    /// 도서 제목
    #[serde(rename = "title", default)]
    pub title: String,
    /// 저자 목록
    #[serde(rename = "authors", default)]
    pub authors: Vec<String>,
    /// 출판일 문자열
    #[serde(rename = "publishedDate", default)]
    pub published_date: String,
    /// 산업 식별자 목록
    #[serde(rename = "industryIdentifiers", default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

/// 검색 된 단일 도서 항목
#[derive(Debug, Deserialize)]
pub struct Volume {
    /// 도서 정보로 응답에 없으면 모든 필드가 기본값으로 채워진다
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
}

impl Volume {
    fn to_search_result(&self) -> SearchResult {
        let info = &self.volume_info;

        let isbn = info.industry_identifiers.iter()
            .map(|identifier| format!("{}: {}", identifier.kind, identifier.identifier))
            .collect::<Vec<_>>()
            .join(", ");
        let author = info.authors.join(", ");

        // 출판일 문자열의 앞 4자리를 연도로 파싱하며 실패하면 None
        let publication_year = if !info.published_date.is_empty() {
            info.published_date.chars()
                .take(4)
                .collect::<String>()
                .parse::<i32>()
                .ok()
        } else {
            None
        };

        SearchResult {
            isbn,
            title: info.title.clone(),
            author,
            publication_year,
        }
    }
}

/// API 응답 구조체로 검색 된 도서 목록 포함
#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    /// 검색 된 도서 목록으로 응답에 키 자체가 없을 수 있다
    #[serde(rename = "items", default)]
    pub items: Vec<Volume>,
}

impl VolumesResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.items.iter()
            .map(|volume| volume.to_search_result())
            .collect()
    }
}

/// 구글 북스 API 클라이언트
#[derive(Clone)]
pub struct Client {
    /// API 인증 키
    key: String
}

impl Client {

    pub fn new_with_env() -> Result<Self, VarError> {
        let key = env::var("GOOGLE_BOOKS_KEY")?;
        Ok(Self { key })
    }
}

impl CatalogClient for Client {

    fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        let url = build_search_url(&self.key, query)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let response = client.get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        let response_text = response.text()
            .map_err(|e| ClientError::ResponseTextExtractionFailed(e.to_string()))?;
        let parsed_response: VolumesResponse = serde_json::from_str(&response_text)
            .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))?;

        Ok(parsed_response.into_results())
    }
}

fn build_search_url(key: &str, query: &str) -> Result<reqwest::Url, ClientError> {
    let mut url = reqwest::Url::parse(VOLUME_SEARCH_ENDPOINT)
        .map_err(|_| ClientError::InvalidBaseUrl)?;

    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("key", key);

    Ok(url)
}
