//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the cake and health endpoints, the cake DTOs and the
//! error wrappers from [`crate::inbound::http::schemas`], plus the HTTP Basic
//! security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use crate::inbound::http::cakes::{CakeCreatedResponse, CakePayload, CakeResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the HTTP Basic security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cake Manager API",
        description = "Catalogue of cakes with role-based access over HTTP Basic authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::cakes::create_cake,
        crate::inbound::http::cakes::list_cakes,
        crate::inbound::http::cakes::get_cake,
        crate::inbound::http::cakes::update_cake,
        crate::inbound::http::cakes::delete_cake,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CakePayload,
        CakeResponse,
        CakeCreatedResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "cakes", description = "Cake catalogue management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/cakes")]
    #[case("/api/v1/cakes/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn cake_response_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let mut fields = object_fields(schemas.get("CakeResponse").expect("CakeResponse schema"));
        fields.sort();

        assert_eq!(fields, ["description", "id", "name", "price"]);
    }

    #[rstest]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("crate.domain.Error").expect("Error schema"));

        assert!(fields.contains(&"code".to_owned()));
        assert!(fields.contains(&"errors".to_owned()));
    }

    #[rstest]
    fn basic_auth_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");

        assert!(components.security_schemes.contains_key("BasicAuth"));
    }
}
