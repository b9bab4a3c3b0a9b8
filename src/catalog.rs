//! Paginated browsing of the Pokemon list, with an optional type filter.

use crate::api::PokeApiClient;
use crate::errors::ApiResult;
use schema::{capitalize, Creature, NamedResource, TypeName};
use serde::Serialize;

pub const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Where a page sits within the whole listing. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl PageInfo {
    /// Clamps `page` into `1..=total_pages`.
    pub fn new(page: u32, count: u32, page_size: u32) -> Self {
        let total_pages = total_pages(count, page_size);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
            page_size,
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Never less than one, so an empty listing still has a page to show.
pub fn total_pages(count: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Sprite for a list entry, derived from the id in its resource URL.
pub fn sprite_url(resource: &NamedResource) -> Option<String> {
    resource
        .resource_id()
        .map(|id| format!("{}/{}.png", SPRITE_BASE_URL, id))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub display_name: String,
    pub sprite: Option<String>,
}

impl From<&NamedResource> for CatalogEntry {
    fn from(resource: &NamedResource) -> Self {
        Self {
            name: resource.name.clone(),
            display_name: capitalize(&resource.name),
            sprite: sprite_url(resource),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    pub info: PageInfo,
    pub count: u32,
    pub type_filter: Option<TypeName>,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    client: PokeApiClient,
    page_size: u32,
}

impl Catalog {
    pub fn new(client: PokeApiClient, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// One page of the full listing. A page past the end is served as the
    /// last page.
    pub async fn page(&self, page: u32) -> ApiResult<CatalogPage> {
        let requested = page.max(1);
        let offset = (requested - 1).saturating_mul(self.page_size);
        let mut response = self.client.list_pokemon(self.page_size, offset).await?;
        let info = PageInfo::new(requested, response.count, self.page_size);

        if info.page != requested {
            tracing::debug!(requested, served = info.page, "page out of range, serving last page");
            response = self.client.list_pokemon(self.page_size, info.offset()).await?;
        }

        Ok(CatalogPage {
            info,
            count: response.count,
            type_filter: None,
            entries: response.results.iter().map(CatalogEntry::from).collect(),
        })
    }

    /// One page of the Pokemon that have `type_name` in either slot.
    pub async fn page_of_type(&self, type_name: &str, page: u32) -> ApiResult<CatalogPage> {
        let members = self.client.type_members(type_name).await?;
        Ok(paginate_members(
            TypeName::new(type_name),
            &members,
            page,
            self.page_size,
        ))
    }

    pub async fn details(&self, name: &str) -> ApiResult<Creature> {
        self.client.pokemon(name).await
    }

    pub async fn type_names(&self) -> ApiResult<Vec<String>> {
        let types = self.client.list_types().await?;
        Ok(types.into_iter().map(|entry| entry.name).collect())
    }
}

fn paginate_members(
    type_name: TypeName,
    members: &[NamedResource],
    page: u32,
    page_size: u32,
) -> CatalogPage {
    let count = members.len() as u32;
    let info = PageInfo::new(page, count, page_size);
    let entries = members
        .iter()
        .skip(info.offset() as usize)
        .take(page_size as usize)
        .map(CatalogEntry::from)
        .collect();
    CatalogPage {
        info,
        count,
        type_filter: Some(type_name),
        entries,
    }
}
