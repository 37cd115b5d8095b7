use axum::Json;

use crate::server::serializers::HelloOut;

pub async fn hello() -> Json<HelloOut> {
    Json(HelloOut {
        message: "Hello from backend!".to_string(),
    })
}
