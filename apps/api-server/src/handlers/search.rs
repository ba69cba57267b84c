//! Proximity search handler.

use actix_web::{HttpResponse, web};

use around_core::domain::Post;
use around_core::services::ProximityQuery;
use around_shared::dto::{LocationView, PostView, SearchParams};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_view(post: Post) -> PostView {
    PostView {
        user: post.author,
        message: post.message,
        location: LocationView {
            lat: post.location.latitude,
            lon: post.location.longitude,
        },
        url: post.media_url,
    }
}

/// GET /search?lat=..&lon=..&range=..
pub async fn search(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = ProximityQuery::from_raw(
        params.lat.as_deref(),
        params.lon.as_deref(),
        params.range.as_deref(),
    );
    tracing::info!(
        username = %identity.username,
        lat = query.center.latitude,
        lon = query.center.longitude,
        range_km = query.range_km,
        "Received search request"
    );

    let posts = state.search.search(query).await?;
    let body: Vec<PostView> = posts.into_iter().map(to_view).collect();

    Ok(HttpResponse::Ok().json(body))
}
