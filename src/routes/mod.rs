use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{auth, bookings, contact, customers, packages, stages};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

/// Largest accepted package form, image included
const MAX_PACKAGE_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    // Token-protected auth routes
    let session_routes = Router::new()
        .route("/me", get(auth::me))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(session_routes);

    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking).delete(bookings::cancel_booking))
        .route("/organizer/{id}", get(bookings::organizer_bookings))
        .route("/customer/{id}", get(bookings::customer_bookings));

    let package_routes = Router::new()
        .route(
            "/",
            get(packages::list_packages)
                .post(packages::create_package)
                .layer(DefaultBodyLimit::max(MAX_PACKAGE_UPLOAD_BYTES)),
        )
        .route("/all", get(packages::list_all_packages))
        .route("/filter", get(packages::filter_packages))
        .route("/organizers", get(packages::list_package_organizers))
        .route(
            "/{id}/organizers/{org_id}",
            post(packages::add_organizer).delete(packages::remove_organizer),
        )
        .route("/{id}", delete(packages::delete_package));

    let customer_routes = Router::new()
        .route("/booked-customers", get(customers::booked_customers))
        .route("/organizers", get(customers::list_organizers))
        .route("/packages", get(packages::filter_packages));

    let stage_routes = Router::new()
        .route(
            "/packages",
            get(stages::stage_packages).post(stages::create_stage_package),
        )
        .route("/customers", get(stages::stage_customers));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/packages", package_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/stages", stage_routes)
        .route("/api/send-email", post(contact::send_email))
        .with_state(state)
}
