use axum::Json;
use barberbook_core::models::service::{ServiceInfo, ServiceOffering};

pub async fn list_services() -> Json<Vec<ServiceInfo>> {
    Json(ServiceOffering::ALL.into_iter().map(ServiceInfo::from).collect())
}
