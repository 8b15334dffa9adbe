use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::login,
        api::auth::get_me,
        api::actions::run_action,
        api::books::list_books,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::books::is_borrowed,
        api::books::is_available,
        api::members::list_members,
        api::members::create_member,
        api::members::has_unpaid_fines,
        api::members::create_staff,
        api::fines::list_fines,
        api::fines::fines_in_period,
        api::reports::monthly_summary,
        api::reports::popular_books,
        api::reports::top_authors,
        api::reports::active_members,
    ),
    tags(
        (name = "library-backoffice", description = "Library back office API")
    )
)]
pub struct ApiDoc;
