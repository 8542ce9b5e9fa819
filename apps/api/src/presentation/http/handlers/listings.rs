//! Listing request handlers.
//!
//! Handlers parse input, call the listing service and map the result to a
//! DTO exactly once. They never build error
//! responses themselves: every failure is returned as an [`AppError`] via `?`.

use crate::{
    application::listings::dto::{
        CreateListingRequest, ListingDto, SearchListingsQuery, UpdateListingRequest, to_dto,
        to_dtos,
    },
    presentation::http::{
        errors::{AppError, HandlerResult},
        response::ApiResponse,
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

pub async fn get_listings(
    State(state): State<AppState>,
) -> HandlerResult<ApiResponse<Vec<ListingDto>>> {
    let listings = state.listings.get_all_listings().await?;
    Ok(ApiResponse::ok(to_dtos(&listings), "Listings Fetched Successfully"))
}

pub async fn create_listing(
    State(state): State<AppState>,
    payload: Result<Json<CreateListingRequest>, JsonRejection>,
) -> HandlerResult<ApiResponse<ListingDto>> {
    let Json(request) = payload?;

    if request.name.as_deref().map(str::trim).is_none_or(str::is_empty) {
        return Err(AppError::BadRequest("Required field name".into()));
    }

    let listing = state.listings.create_new_listing(request).await?;
    Ok(ApiResponse::new(
        StatusCode::CREATED,
        to_dto(&listing),
        "Listing Created Successfully",
    ))
}

pub async fn get_single_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<ApiResponse<ListingDto>> {
    let listing = state.listings.get_listing(&id).await?;
    Ok(ApiResponse::ok(to_dto(&listing), "Listing Fetched Successfully"))
}

pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateListingRequest>, JsonRejection>,
) -> HandlerResult<ApiResponse<ListingDto>> {
    let Json(request) = payload?;
    let listing = state.listings.update_listing(&id, request).await?;
    Ok(ApiResponse::ok(to_dto(&listing), "Listing Updated Successfully"))
}

pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<ApiResponse<ListingDto>> {
    let listing = state.listings.delete_listing(&id).await?;
    Ok(ApiResponse::ok(to_dto(&listing), "Listing Deleted Successfully"))
}

pub async fn search_listings(
    State(state): State<AppState>,
    query: Result<Query<SearchListingsQuery>, QueryRejection>,
) -> HandlerResult<ApiResponse<Vec<ListingDto>>> {
    let Query(params) = query?;
    let listings = state.listings.search_listings(params).await?;
    Ok(ApiResponse::ok(to_dtos(&listings), "Listings Fetched Successfully"))
}
