// Pokedex - read-only JSON surface
// Same filter rule and chain assembly as the terminal UI, served over axum

use crate::badges::BadgeBar;
use crate::catalog::{Catalog, Pokemon};
use crate::chains::assemble;
use crate::palette::Palette;
use crate::view::ViewController;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::debug;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pokemon as served to web clients, with colors resolved
#[derive(Serialize)]
struct PokemonResponse {
    id: u32,
    number: String,
    name: &'static str,
    categories: Vec<CategoryResponse>,
    image: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    evolution: Option<EvolutionResponse>,
}

#[derive(Serialize)]
struct CategoryResponse {
    label: &'static str,
    color: &'static str,
}

#[derive(Serialize)]
struct EvolutionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u32>,
}

impl PokemonResponse {
    fn new(pokemon: &Pokemon, palette: &Palette) -> Self {
        Self {
            id: pokemon.id,
            number: pokemon.display_number(),
            name: pokemon.name,
            categories: pokemon
                .categories
                .iter()
                .map(|&label| CategoryResponse {
                    label,
                    color: palette.color_for(label).css_class(),
                })
                .collect(),
            image: pokemon.image,
            evolution: pokemon.evolution.map(|e| EvolutionResponse {
                from: e.from,
                to: e.to,
                level: e.level,
            }),
        }
    }
}

#[derive(Serialize)]
struct ChainLinkResponse {
    pokemon: PokemonResponse,
    level: Option<u32>,
    connector: bool,
}

#[derive(Serialize)]
struct BadgeResponse {
    label: &'static str,
    category: Option<&'static str>,
    color: &'static str,
    selected: bool,
}

/// Query string for the filtered view
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub search: String,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/pokemon?search=&type= - Filtered view
async fn list_pokemon(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog.as_ref();
    let mut view = ViewController::new(catalog);
    view.set_search(query.search);
    // An empty `type=` means "all"
    view.select_category(query.category.as_deref().filter(|c| !c.is_empty()));

    debug!(results = view.filtered().len(), "pokemon list served");

    let response: Vec<PokemonResponse> = view
        .filtered()
        .iter()
        .map(|p| PokemonResponse::new(p, catalog.palette()))
        .collect();

    Json(ApiResponse::ok(response))
}

/// GET /api/pokemon/:id - Single entry
async fn get_pokemon(State(state): State<AppState>, Path(id): Path<u32>) -> impl IntoResponse {
    let catalog = state.catalog.as_ref();

    match catalog.get(id) {
        Some(pokemon) => (
            StatusCode::OK,
            Json(ApiResponse::ok(PokemonResponse::new(pokemon, catalog.palette()))),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<PokemonResponse>::err(format!(
                "pokemon {} not found",
                id
            ))),
        )
            .into_response(),
    }
}

/// GET /api/chains - Evolution chains
async fn list_chains(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.as_ref();

    let response: Vec<Vec<ChainLinkResponse>> = assemble(catalog)
        .into_iter()
        .map(|chain| {
            chain
                .links
                .into_iter()
                .map(|link| ChainLinkResponse {
                    pokemon: PokemonResponse::new(link.pokemon, catalog.palette()),
                    level: link.level,
                    connector: link.connector,
                })
                .collect()
        })
        .collect();

    Json(ApiResponse::ok(response))
}

/// GET /api/types?type= - Category badges
async fn list_types(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> impl IntoResponse {
    let selected = query.category.as_deref().filter(|c| !c.is_empty());

    let response: Vec<BadgeResponse> = BadgeBar::new(&state.catalog, selected)
        .badges
        .into_iter()
        .map(|badge| BadgeResponse {
            label: badge.label(),
            category: badge.category,
            color: badge.color.css_class(),
            selected: badge.selected,
        })
        .collect();

    Json(ApiResponse::ok(response))
}

/// Build the full router: `/api/*` routes with permissive CORS
pub fn router(catalog: Arc<Catalog>) -> Router {
    let state = AppState { catalog };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/:id", get(get_pokemon))
        .route("/chains", get(list_chains))
        .route("/types", get(list_types))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LoadOptions;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let catalog = Arc::new(Catalog::load(LoadOptions::default()).unwrap());
        let response = router(catalog)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn names(body: &Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_json("/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_list_without_filters_returns_catalog() {
        let (status, body) = get_json("/api/pokemon").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body).len(), 12);
        assert_eq!(body["data"][0]["number"], "#001");
        assert_eq!(body["data"][0]["categories"][0]["color"], "bg-green-500");
    }

    #[tokio::test]
    async fn test_list_filters_by_search_and_type() {
        // "пика" and "Вода", percent-encoded
        let (_, body) = get_json("/api/pokemon?search=%D0%BF%D0%B8%D0%BA%D0%B0").await;
        assert_eq!(names(&body), vec!["Пикачу"]);

        let (_, body) = get_json("/api/pokemon?type=%D0%92%D0%BE%D0%B4%D0%B0").await;
        assert_eq!(names(&body), vec!["Сквиртл", "Вартортл", "Бластойз"]);

        let (_, body) = get_json("/api/pokemon?search=zzz").await;
        assert!(names(&body).is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_pokemon_is_404() {
        let (status, body) = get_json("/api/pokemon/42").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "pokemon 42 not found");
    }

    #[tokio::test]
    async fn test_get_pokemon_includes_evolution() {
        let (status, body) = get_json("/api/pokemon/2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["evolution"]["from"], "Бульбазавр");
        assert_eq!(body["data"]["evolution"]["level"], 32);
    }

    #[tokio::test]
    async fn test_chains_carry_levels_and_connectors() {
        let (_, body) = get_json("/api/chains").await;
        let first = body["data"][0].as_array().unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first[0]["pokemon"]["name"], "Бульбазавр");
        assert_eq!(first[0]["level"], 16);
        assert_eq!(first[1]["level"], 32);
        assert!(first[2]["level"].is_null());
        assert_eq!(first[2]["connector"], false);
    }

    #[tokio::test]
    async fn test_types_start_with_all_badge() {
        let (_, body) = get_json("/api/types").await;
        let badges = body["data"].as_array().unwrap();

        assert_eq!(badges.len(), 9);
        assert_eq!(badges[0]["label"], "Все");
        assert_eq!(badges[0]["selected"], true);
        assert_eq!(badges[1]["label"], "Трава");
    }
}
