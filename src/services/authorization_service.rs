//! Gate de autorización por rol/ruta
//!
//! Función pura `(rol, ruta) -> Allow | Redirect` sobre una tabla
//! inmutable rol -> páginas permitidas, inyectada al arrancar (nunca
//! un global mutable). Las rutas pueden llevar un prefijo envoltorio
//! opcional `unpublic` y un segmento de rol; el resto de segmentos
//! son nombres de página que se comprueban por pertenencia exacta.

use std::collections::{HashMap, HashSet};

use crate::models::user::UserRole;

/// Decisión del gate para una ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(String),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::Redirect(target) => Some(target),
        }
    }
}

/// Tabla inmutable de acceso rol -> páginas permitidas
#[derive(Debug, Clone)]
pub struct RouteAccessPolicy {
    allowed_pages: HashMap<UserRole, HashSet<String>>,
}

impl RouteAccessPolicy {
    pub fn new(allowed_pages: HashMap<UserRole, HashSet<String>>) -> Self {
        Self { allowed_pages }
    }

    /// Tabla estándar del taller
    pub fn standard() -> Self {
        let mut allowed_pages = HashMap::new();

        allowed_pages.insert(
            UserRole::Admin,
            pages(&[
                "dashboard",
                "customers",
                "vehicles",
                "orders",
                "tasks",
                "warehouse",
                "parts",
                "invoices",
                "users",
                "settings",
            ]),
        );
        allowed_pages.insert(
            UserRole::Mechanic,
            pages(&["dashboard", "orders", "tasks", "vehicles"]),
        );
        allowed_pages.insert(
            UserRole::Client,
            pages(&["dashboard", "orders", "vehicles", "invoices"]),
        );
        allowed_pages.insert(
            UserRole::Warehouse,
            pages(&["dashboard", "parts", "warehouse", "orders"]),
        );

        Self::new(allowed_pages)
    }

    /// Evaluar el acceso de un rol (o de nadie) a una ruta
    pub fn evaluate(&self, role: Option<UserRole>, path: &str) -> AccessDecision {
        let mut segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .peekable();

        // Prefijo envoltorio opcional
        if segments.peek() == Some(&"unpublic") {
            segments.next();
        }

        // Sin segmento de rol al frente la ruta es pública
        let path_role = match segments.peek().copied().and_then(UserRole::from_segment) {
            Some(path_role) => {
                segments.next();
                path_role
            }
            None => return AccessDecision::Allow,
        };

        // Ruta con prefijo de rol sin sesión: al login
        let Some(role) = role else {
            return AccessDecision::Redirect("/login".to_string());
        };

        let home = format!("/{}/dashboard", role.as_str());

        if path_role != role {
            return AccessDecision::Redirect(home);
        }

        let allowed = self
            .allowed_pages
            .get(&role)
            .cloned()
            .unwrap_or_default();

        for page in segments {
            if !allowed.contains(page) {
                return AccessDecision::Redirect(home);
            }
        }

        AccessDecision::Allow
    }
}

fn pages(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RouteAccessPolicy {
        RouteAccessPolicy::standard()
    }

    #[test]
    fn test_public_path_allowed_for_anyone() {
        assert_eq!(policy().evaluate(None, "/login"), AccessDecision::Allow);
        assert_eq!(
            policy().evaluate(Some(UserRole::Client), "/"),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_unauthenticated_role_path_redirects_to_login() {
        assert_eq!(
            policy().evaluate(None, "/admin/dashboard"),
            AccessDecision::Redirect("/login".to_string())
        );
        assert_eq!(
            policy().evaluate(None, "/unpublic/mechanic/orders"),
            AccessDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_wrong_role_segment_redirects_to_own_dashboard() {
        assert_eq!(
            policy().evaluate(Some(UserRole::Client), "/admin/users"),
            AccessDecision::Redirect("/client/dashboard".to_string())
        );
        assert_eq!(
            policy().evaluate(Some(UserRole::Mechanic), "/warehouse/parts"),
            AccessDecision::Redirect("/mechanic/dashboard".to_string())
        );
    }

    #[test]
    fn test_allowed_page_for_matching_role() {
        assert_eq!(
            policy().evaluate(Some(UserRole::Admin), "/admin/users"),
            AccessDecision::Allow
        );
        assert_eq!(
            policy().evaluate(Some(UserRole::Warehouse), "/warehouse/parts"),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_page_outside_role_set_redirects() {
        assert_eq!(
            policy().evaluate(Some(UserRole::Client), "/client/users"),
            AccessDecision::Redirect("/client/dashboard".to_string())
        );
        assert_eq!(
            policy().evaluate(Some(UserRole::Mechanic), "/mechanic/invoices"),
            AccessDecision::Redirect("/mechanic/dashboard".to_string())
        );
    }

    #[test]
    fn test_unpublic_wrapper_is_transparent() {
        assert_eq!(
            policy().evaluate(Some(UserRole::Admin), "/unpublic/admin/orders"),
            AccessDecision::Allow
        );
        assert_eq!(
            policy().evaluate(Some(UserRole::Client), "/unpublic/admin/orders"),
            AccessDecision::Redirect("/client/dashboard".to_string())
        );
    }

    #[test]
    fn test_decision_helpers() {
        assert!(AccessDecision::Allow.is_allowed());
        assert_eq!(
            AccessDecision::Redirect("/login".to_string()).redirect_target(),
            Some("/login")
        );
    }
}
