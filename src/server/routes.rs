use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::HOST, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    core::{ledger::POPULAR_LIMIT, PopularCar, RatedCar},
    server::{
        error,
        pagination::{PageQuery, Paginated, Paginator},
        state::AppState,
    },
    utils::error::{Result, ServiceError},
};

#[derive(Debug, Deserialize)]
pub struct CarPayload {
    make: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatingPayload {
    car_id: Option<i64>,
    rating: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingBody {
    pub car_id: i64,
    pub rating: i64,
}

const REQUIRED: &str = "This field is required.";

fn payload<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(payload)| payload).map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(rejection) => ServiceError::UnsupportedMediaType {
            message: rejection.body_text(),
        },
        other => ServiceError::MalformedPayload {
            message: other.body_text(),
        },
    })
}

/// Reports every absent field of `(name, present)` in one error.
fn missing_fields(fields: &[(&str, bool)]) -> ServiceError {
    let errors = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| (field.to_string(), REQUIRED.to_string()))
        .collect();
    ServiceError::FieldErrors { errors }
}

/// Absolute URL of `path` on the host the client addressed.
fn absolute_url(headers: &HeaderMap, path: &str) -> String {
    match headers.get(HOST).and_then(|host| host.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path.to_string(),
    }
}

pub async fn root_handler(headers: HeaderMap) -> impl IntoResponse {
    Json(json!({
        "cars": absolute_url(&headers, "/cars/"),
        "rate": absolute_url(&headers, "/rate/"),
        "popular": absolute_url(&headers, "/popular/"),
    }))
}

pub async fn create_car_handler(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<CarPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<RatedCar>)> {
    let (make, model) = match payload(body)? {
        CarPayload {
            make: Some(make),
            model: Some(model),
        } => (make, model),
        CarPayload { make, model } => {
            return Err(missing_fields(&[
                ("make", make.is_some()),
                ("model", model.is_some()),
            ]))
        }
    };

    let car = state.cars.create(&make, &model).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

pub async fn list_cars_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Json<Paginated<RatedCar>>> {
    let paginator = Paginator::from_query(&query, state.page_size)?;
    let page = state.cars.list(paginator.request()?).await?;

    let listing = paginator.paginate(page.total, page.items, &absolute_url(&headers, "/cars/"))?;
    Ok(Json(listing))
}

pub async fn delete_car_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    // non-numeric ids can never match a car
    let Ok(id) = id.parse::<i64>() else {
        return error::not_found();
    };

    match state.cars.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn rate_handler(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<RatingPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<RatingBody>)> {
    let (car_id, rating) = match payload(body)? {
        RatingPayload {
            car_id: Some(car_id),
            rating: Some(rating),
        } => (car_id, rating),
        RatingPayload { car_id, rating } => {
            return Err(missing_fields(&[
                ("car_id", car_id.is_some()),
                ("rating", rating.is_some()),
            ]))
        }
    };

    let rating = state
        .ratings
        .create(car_id, rating)
        .await
        .map_err(|e| match e {
            ServiceError::NotFoundError { id, .. } => ServiceError::validation(
                "car_id",
                format!("Invalid pk \"{}\" - object does not exist.", id),
            ),
            other => other,
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RatingBody {
            car_id: rating.car_id,
            rating: rating.rating,
        }),
    ))
}

pub async fn popular_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Json<Paginated<PopularCar>>> {
    let paginator = Paginator::from_query(&query, state.page_size)?;
    let cars = state.ratings.popular(POPULAR_LIMIT).await?;

    let listing = paginator.paginate_all(cars, &absolute_url(&headers, "/popular/"))?;
    Ok(Json(listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_absolute_url() {
        let mut headers = HeaderMap::new();
        assert_eq!(absolute_url(&headers, "/cars/"), "/cars/");

        headers.insert(HOST, HeaderValue::from_static("localhost:8000"));
        assert_eq!(absolute_url(&headers, "/cars/"), "http://localhost:8000/cars/");
    }

    #[test]
    fn test_missing_fields_lists_every_absent_field() {
        let err = missing_fields(&[("make", false), ("model", false)]);
        let ServiceError::FieldErrors { errors } = err else {
            panic!("expected field errors, got {err:?}");
        };
        assert_eq!(
            errors,
            vec![
                ("make".to_string(), REQUIRED.to_string()),
                ("model".to_string(), REQUIRED.to_string()),
            ]
        );

        let err = missing_fields(&[("car_id", true), ("rating", false)]);
        assert!(matches!(
            err,
            ServiceError::FieldErrors { ref errors } if errors.len() == 1 && errors[0].0 == "rating"
        ));
    }

    #[tokio::test]
    async fn test_json_without_content_type_is_unsupported_media_type() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/cars/")
            .body(axum::body::Body::from(r#"{"make":"volkswagen","model":"golf"}"#))
            .unwrap();
        let body = <Json<CarPayload> as axum::extract::FromRequest<()>>::from_request(request, &())
            .await;

        let err = payload(body).unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedMediaType { .. }));
        assert_eq!(err.status_code(), 415);
    }
}
