//! automation_posts table operations

use crate::SupabaseClient;
use crate::error::Result;
use backlinkoo_core::domain::post::{AutomationPost, PostPatch};
use uuid::Uuid;

/// PostgREST path of the posts table
const POSTS_TABLE: &str = "automation_posts";

impl SupabaseClient {
    /// Fetches one page of posts ordered by id
    ///
    /// # Arguments
    /// * `offset` - Row offset into the id-ordered table
    /// * `limit` - Maximum rows to return
    /// * `domain_id` - Restrict to a single domain when set
    ///
    /// # Returns
    /// The page of posts; shorter than `limit` on the last page
    ///
    /// # Example
    /// ```no_run
    /// # use backlinkoo_client::SupabaseClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = SupabaseClient::from_env()?;
    /// let page = client.list_posts(0, 100, None).await?;
    /// println!("fetched {} posts", page.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_posts(
        &self,
        offset: usize,
        limit: usize,
        domain_id: Option<Uuid>,
    ) -> Result<Vec<AutomationPost>> {
        let url = self.rest_url(POSTS_TABLE);
        let mut request = self
            .client
            .get(&url)
            .query(&[
                ("select", "id,title,content,slug,url,domain_id"),
                ("order", "id.asc"),
            ])
            .query(&[("offset", offset.to_string()), ("limit", limit.to_string())]);
        if let Some(id) = domain_id {
            request = request.query(&[("domain_id", format!("eq.{id}"))]);
        }

        let response = self.send_guarded(request).await?;
        crate::decode_response(response).await
    }

    /// Applies a patch to a single post
    ///
    /// Sends `Prefer: return=minimal` so PostgREST answers 204 without a
    /// body. Callers guarantee the patch is non-empty.
    ///
    /// # Arguments
    /// * `id` - The post UUID
    /// * `patch` - Changed fields plus the `updated_at` stamp
    pub async fn update_post(&self, id: Uuid, patch: &PostPatch) -> Result<()> {
        let url = self.rest_url(POSTS_TABLE);
        let request = self
            .client
            .patch(&url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(patch);

        let response = self.send_guarded(request).await?;
        crate::expect_success(response).await
    }
}
