#![allow(dead_code)]

//! Shared fixtures for integration tests

use once_cell::sync::Lazy;
use pantry::{
    CreateCategoryRequest, CreateListRequest, CreateProductRequest, CreateWorkspaceRequest,
    Identity, List, Pantry, Workspace,
};
use pantry_engine::testing::FixedCredentials;
use std::sync::Arc;

static TRACING: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .with_test_writer()
        .try_init()
        .ok();
});

/// A pantry plus three users: alice, bob, and mallory
///
/// Tokens are `<name>-token`, invite handles `<name>@example.com`.
pub struct World {
    pub pantry: Pantry,
    pub alice: Identity,
    pub bob: Identity,
    pub mallory: Identity,
}

pub fn world() -> World {
    Lazy::force(&TRACING);

    let mut credentials = FixedCredentials::new();
    let alice = credentials.user("alice");
    let bob = credentials.user("bob");
    let mallory = credentials.user("mallory");

    let shared = Arc::new(credentials);
    let pantry = Pantry::builder()
        .authenticator(shared.clone())
        .identities(shared)
        .build();
    World {
        pantry,
        alice,
        bob,
        mallory,
    }
}

impl World {
    /// A workspace owned by alice
    pub fn workspace(&self) -> Workspace {
        self.pantry
            .create_workspace(
                &self.alice,
                CreateWorkspaceRequest {
                    name: "Home".into(),
                    icon: None,
                },
            )
            .unwrap()
    }

    /// A workspace and a list inside it, both owned by alice
    pub fn workspace_with_list(&self) -> (Workspace, List) {
        let workspace = self.workspace();
        let list = self
            .pantry
            .create_list(
                &self.alice,
                CreateListRequest {
                    workspace: workspace.id,
                    name: "Groceries".into(),
                },
            )
            .unwrap();
        (workspace, list)
    }

    /// A category and one product in it, owned by the given user in the
    /// given workspace
    pub fn category_with_product(
        &self,
        owner: &Identity,
        workspace: pantry::WorkspaceId,
        category_name: &str,
        product_name: &str,
    ) -> (pantry::Category, pantry::Product) {
        let category = self
            .pantry
            .create_category(
                owner,
                CreateCategoryRequest {
                    workspace,
                    name: category_name.into(),
                },
            )
            .unwrap();
        let product = self
            .pantry
            .create_product(
                owner,
                CreateProductRequest {
                    category: category.id,
                    name: product_name.into(),
                    default_unit: None,
                },
            )
            .unwrap();
        (category, product)
    }
}
