//! Category service.
//!
//! Listings rebuild the tree from the flat row set, flatten it
//! depth-first with level annotations, and only then apply the page
//! window — page boundaries are defined over the flattened order.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::category::{
    CategoryDetail, CategoryNode, CategoryRow, CreateCategory, UpdateCategory,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::CategoryRepository;
use crate::types::{
    BulkMutationResponse, MutationResponse, Pageable, SortParams, SuccessType,
};
use crate::utils::slug::{is_valid_slug, probe_candidate};

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn find_all(
        &self,
        search: Option<String>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<CategoryNode>>;

    async fn count(&self, search: Option<String>) -> AppResult<u64>;

    async fn create(&self, actor: i32, data: CreateCategory) -> AppResult<MutationResponse>;

    async fn find_one(&self, id: i32) -> AppResult<CategoryDetail>;

    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateCategory,
    ) -> AppResult<MutationResponse>;

    /// Physically delete a batch; fails entirely when any id is missing
    /// or marks the default category
    async fn delete_many(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;

    async fn set_default(&self, actor: i32, id: i32) -> AppResult<MutationResponse>;
}

/// Flatten a parent-pointer forest depth-first, annotating each node with
/// its depth. Children keep the incoming row order.
pub fn flatten_tree(rows: Vec<CategoryRow>) -> Vec<CategoryNode> {
    let known: std::collections::HashSet<i32> = rows.iter().map(|r| r.id).collect();
    let mut children: HashMap<i32, Vec<&CategoryRow>> = HashMap::new();
    let mut roots: Vec<&CategoryRow> = Vec::new();

    for row in &rows {
        match row.parent_id {
            Some(parent) if known.contains(&parent) => {
                children.entry(parent).or_default().push(row);
            }
            _ => roots.push(row),
        }
    }

    fn walk(
        node: &CategoryRow,
        level: usize,
        children: &HashMap<i32, Vec<&CategoryRow>>,
        out: &mut Vec<CategoryNode>,
    ) {
        out.push(CategoryNode {
            id: node.id,
            name: node.name.clone(),
            description: node.description.clone(),
            parent_id: node.parent_id,
            is_default: node.is_default,
            level,
        });
        if let Some(kids) = children.get(&node.id) {
            for kid in kids {
                walk(kid, level + 1, children, out);
            }
        }
    }

    let mut out = Vec::with_capacity(rows.len());
    for root in roots {
        walk(root, 0, &children, &mut out);
    }
    out
}

/// Concrete implementation of CategoryService.
pub struct CategoryManager {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryManager {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    async fn probe_slug(&self, base: &str, exclude_id: Option<i32>) -> AppResult<String> {
        let mut index = 0;
        loop {
            let candidate = probe_candidate(base, index);
            if !self.repo.slug_exists(&candidate, exclude_id).await? {
                return Ok(candidate);
            }
            index += 1;
        }
    }

    async fn ensure_parent_exists(&self, parent_id: Option<i32>) -> AppResult<()> {
        if let Some(parent_id) = parent_id {
            if self.repo.find_by_id(parent_id).await?.is_none() {
                return Err(AppError::not_found("Danh mục cha không tồn tại."));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryService for CategoryManager {
    async fn find_all(
        &self,
        search: Option<String>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<CategoryNode>> {
        let rows = self.repo.find_rows(search, sort).await?;
        let flattened = flatten_tree(rows);

        // Pagination happens after hierarchical flattening
        let start = pageable.offset as usize;
        let end = (pageable.offset + pageable.limit) as usize;
        Ok(flattened
            .into_iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect())
    }

    async fn count(&self, search: Option<String>) -> AppResult<u64> {
        self.repo.count(search).await
    }

    async fn create(&self, actor: i32, data: CreateCategory) -> AppResult<MutationResponse> {
        let base_slug = data.slug.trim().to_string();
        if !is_valid_slug(&base_slug) {
            return Err(AppError::bad_request(
                "Slug không hợp lệ. Chỉ dùng chữ thường, số và dấu gạch ngang.",
            ));
        }

        self.ensure_parent_exists(data.parent_id).await?;

        let final_slug = self.probe_slug(&base_slug, None).await?;
        let id = self.repo.create(actor, data, final_slug).await?;

        Ok(MutationResponse::new(id, SuccessType::Create))
    }

    async fn find_one(&self, id: i32) -> AppResult<CategoryDetail> {
        let category = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Danh mục không tồn tại"))?;

        Ok(CategoryDetail::from(category))
    }

    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateCategory,
    ) -> AppResult<MutationResponse> {
        let category = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Danh mục không tồn tại"))?;

        if let Some(parent_id) = data.parent_id {
            if parent_id == id {
                return Err(AppError::bad_request(
                    "Danh mục không thể là cha của chính nó.",
                ));
            }
        }
        self.ensure_parent_exists(data.parent_id).await?;

        // Re-validate and re-probe only when the slug actually changes
        let final_slug = match data.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() && slug != category.slug => {
                if !is_valid_slug(slug) {
                    return Err(AppError::bad_request(
                        "Slug không hợp lệ. Chỉ dùng chữ thường, số và dấu gạch ngang.",
                    ));
                }
                self.probe_slug(slug, Some(id)).await?
            }
            _ => category.slug.clone(),
        };

        self.repo.update(actor, id, data, final_slug).await?;
        Ok(MutationResponse::new(id, SuccessType::Update))
    }

    async fn delete_many(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        if ids.is_empty() {
            return Err(AppError::bad_request("Danh sách ID không được để trống"));
        }

        let flags = self.repo.find_flags_by_ids(ids.clone()).await?;
        let existing: Vec<i32> = flags.iter().map(|(id, _)| *id).collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !existing.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::not_found(format!(
                "Không tìm thấy danh mục với ID: {}",
                missing.join(", ")
            )));
        }

        // The whole batch fails when any target is the default category
        if flags.iter().any(|(_, is_default)| *is_default) {
            return Err(AppError::bad_request("Không thể xóa danh mục mặc định"));
        }

        self.repo.delete_many(existing.clone()).await?;
        Ok(BulkMutationResponse::new(existing, SuccessType::Delete))
    }

    async fn set_default(&self, actor: i32, id: i32) -> AppResult<MutationResponse> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Danh mục không tồn tại"));
        }

        self.repo.set_default(actor, id).await?;
        Ok(MutationResponse::new(id, SuccessType::SetDefault))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, parent_id: Option<i32>) -> CategoryRow {
        CategoryRow {
            id,
            name: format!("cat-{}", id),
            description: None,
            parent_id,
            is_default: false,
        }
    }

    #[test]
    fn flatten_is_depth_first_with_levels() {
        let rows = vec![row(1, None), row(2, Some(1)), row(3, Some(1)), row(4, Some(2))];
        let flat = flatten_tree(rows);

        let order: Vec<(i32, usize)> = flat.iter().map(|n| (n.id, n.level)).collect();
        assert_eq!(order, vec![(1, 0), (2, 1), (4, 2), (3, 1)]);
    }

    #[test]
    fn orphaned_parent_pointer_becomes_a_root() {
        // Parent 9 is not in the row set (e.g. soft-deleted)
        let rows = vec![row(1, None), row(2, Some(9))];
        let flat = flatten_tree(rows);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[1].id, 2);
        assert_eq!(flat[1].level, 0);
    }

    #[test]
    fn empty_input_flattens_to_empty() {
        assert!(flatten_tree(Vec::new()).is_empty());
    }
}
