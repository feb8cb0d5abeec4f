use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{
    AvailabilityRequest, RentalCostQuery, RentalCostResponse, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::models::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/available", get(list_available_vehicles))
        .route("/search", get(search_vehicles))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/availability", patch(set_availability))
        .route("/:id/rental-cost", get(rental_cost))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.vehicles.clone())
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let response = controller(&state).create(request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    Ok(Json(controller(&state).list()?))
}

async fn list_available_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    Ok(Json(controller(&state).list_available()?))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    Ok(Json(controller(&state).search(&filters)?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    Ok(Json(controller(&state).get_by_id(id)?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    Ok(Json(controller(&state).update(id, request)?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    controller(&state).delete(id)?;
    Ok(Json(ApiResponse::message(
        "Vehículo eliminado exitosamente".to_string(),
    )))
}

async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    Ok(Json(controller(&state).set_availability(id, request.available)?))
}

async fn rental_cost(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RentalCostQuery>,
) -> Result<Json<RentalCostResponse>, AppError> {
    Ok(Json(controller(&state).rental_cost(id, query.duration)?))
}
