//! Category lifecycle tests over an in-memory repository: slug probing,
//! tree flattening with post-flatten pagination, and the default-category
//! guard.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use studio_api::domain::category::{Category, CategoryRow, CreateCategory, UpdateCategory};
use studio_api::errors::{AppError, AppResult};
use studio_api::infra::repositories::CategoryRepository;
use studio_api::services::{CategoryManager, CategoryService};
use studio_api::types::{Pageable, SortParams};

#[derive(Default)]
struct InMemoryCategories {
    rows: Mutex<Vec<Category>>,
}

impl InMemoryCategories {
    fn seed(&self, id: i32, slug: &str, parent_id: Option<i32>, is_default: bool) {
        let now = Utc::now();
        self.rows.lock().unwrap().push(Category {
            id,
            name: format!("cat-{}", id),
            slug: slug.to_string(),
            description: None,
            parent_id,
            is_default,
            delete_flg: 0,
            created_time: now,
            created_user: None,
            updated_time: now,
            updated_user: None,
        });
    }

    fn slug_of(&self, id: i32) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.slug.clone())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_rows(
        &self,
        search: Option<String>,
        _sort: SortParams,
    ) -> AppResult<Vec<CategoryRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.delete_flg == 0)
            .filter(|c| match &search {
                Some(s) => c.name.contains(s),
                None => true,
            })
            .map(|c| CategoryRow {
                id: c.id,
                name: c.name.clone(),
                description: c.description.clone(),
                parent_id: c.parent_id,
                is_default: c.is_default,
            })
            .collect())
    }

    async fn count(&self, search: Option<String>) -> AppResult<u64> {
        Ok(self.find_rows(search, SortParams::default()).await?.len() as u64)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn count_by_ids(&self, ids: Vec<i32>) -> AppResult<u64> {
        let rows = self.rows.lock().unwrap();
        Ok(ids.iter().filter(|id| rows.iter().any(|c| c.id == **id)).count() as u64)
    }

    async fn find_flags_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<(i32, bool)>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| (c.id, c.is_default))
            .collect())
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.slug == slug && Some(c.id) != exclude_id))
    }

    async fn create(
        &self,
        actor: i32,
        data: CreateCategory,
        final_slug: String,
    ) -> AppResult<i32> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        rows.push(Category {
            id,
            name: data.name,
            slug: final_slug,
            description: data.description,
            parent_id: data.parent_id,
            is_default: false,
            delete_flg: 0,
            created_time: now,
            created_user: Some(actor),
            updated_time: now,
            updated_user: Some(actor),
        });
        Ok(id)
    }

    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateCategory,
        final_slug: String,
    ) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Danh mục không tồn tại"))?;
        row.name = data.name;
        row.slug = final_slug;
        row.description = data.description;
        row.parent_id = data.parent_id;
        row.updated_user = Some(actor);
        Ok(())
    }

    async fn delete_many(&self, ids: Vec<i32>) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|c| !ids.contains(&c.id));
        Ok(())
    }

    async fn set_default(&self, _actor: i32, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            row.is_default = row.id == id;
        }
        Ok(())
    }
}

fn manager(repo: Arc<InMemoryCategories>) -> CategoryManager {
    CategoryManager::new(repo)
}

fn create_input(name: &str, slug: &str, parent_id: Option<i32>) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        parent_id,
    }
}

// =============================================================================
// Slug handling
// =============================================================================

#[tokio::test]
async fn colliding_slug_gets_the_smallest_free_suffix() {
    let repo = Arc::new(InMemoryCategories::default());
    repo.seed(1, "photo", None, false);
    repo.seed(2, "photo-1", None, false);
    let svc = manager(repo.clone());

    let result = svc.create(1, create_input("Photo", "photo", None)).await.unwrap();
    assert_eq!(repo.slug_of(result.id).as_deref(), Some("photo-2"));
}

#[tokio::test]
async fn malformed_slug_is_rejected() {
    let svc = manager(Arc::new(InMemoryCategories::default()));
    let result = svc.create(1, create_input("X", "Not A Slug", None)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn unchanged_slug_is_not_reprobed_on_update() {
    let repo = Arc::new(InMemoryCategories::default());
    repo.seed(1, "photo", None, false);
    let svc = manager(repo.clone());

    svc.update(
        1,
        1,
        UpdateCategory {
            name: "Renamed".to_string(),
            slug: Some("photo".to_string()),
            description: None,
            parent_id: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(repo.slug_of(1).as_deref(), Some("photo"));
}

// =============================================================================
// Parent validation
// =============================================================================

#[tokio::test]
async fn missing_parent_is_rejected() {
    let svc = manager(Arc::new(InMemoryCategories::default()));
    let result = svc.create(1, create_input("Child", "child", Some(42))).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn category_cannot_parent_itself() {
    let repo = Arc::new(InMemoryCategories::default());
    repo.seed(1, "root", None, false);
    let svc = manager(repo);

    let result = svc
        .update(
            1,
            1,
            UpdateCategory {
                name: "Root".to_string(),
                slug: None,
                description: None,
                parent_id: Some(1),
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

// =============================================================================
// Flattened listing
// =============================================================================

#[tokio::test]
async fn listing_paginates_over_the_flattened_tree() {
    let repo = Arc::new(InMemoryCategories::default());
    repo.seed(1, "a", None, false);
    repo.seed(2, "b", Some(1), false);
    repo.seed(3, "c", Some(1), false);
    repo.seed(4, "d", Some(2), false);
    let svc = manager(repo);

    // Depth-first: 1(0), 2(1), 4(2), 3(1)
    let all = svc
        .find_all(None, Pageable { limit: 10, offset: 0 }, SortParams::default())
        .await
        .unwrap();
    let order: Vec<(i32, usize)> = all.iter().map(|n| (n.id, n.level)).collect();
    assert_eq!(order, vec![(1, 0), (2, 1), (4, 2), (3, 1)]);

    // Page boundaries apply after flattening
    let second_page = svc
        .find_all(None, Pageable { limit: 2, offset: 2 }, SortParams::default())
        .await
        .unwrap();
    let ids: Vec<i32> = second_page.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![4, 3]);
}

// =============================================================================
// Default-category semantics
// =============================================================================

#[tokio::test]
async fn delete_batch_containing_the_default_fails_entirely() {
    let repo = Arc::new(InMemoryCategories::default());
    repo.seed(1, "a", None, false);
    repo.seed(2, "b", None, true);
    let svc = manager(repo.clone());

    let result = svc.delete_many(vec![1, 2]).await;
    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Không thể xóa danh mục mặc định"),
        other => panic!("expected BadRequest, got {:?}", other.map(|_| ())),
    }
    // Nothing was deleted
    assert_eq!(repo.rows.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_with_unknown_id_fails_with_not_found() {
    let repo = Arc::new(InMemoryCategories::default());
    repo.seed(1, "a", None, false);
    let svc = manager(repo);

    let result = svc.delete_many(vec![1, 99]).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn set_default_leaves_exactly_one_default() {
    let repo = Arc::new(InMemoryCategories::default());
    repo.seed(4, "a", None, true);
    repo.seed(5, "b", None, false);
    let svc = manager(repo.clone());

    svc.set_default(1, 5).await.unwrap();

    let rows = repo.rows.lock().unwrap();
    let defaults: Vec<i32> = rows.iter().filter(|c| c.is_default).map(|c| c.id).collect();
    assert_eq!(defaults, vec![5]);
}
