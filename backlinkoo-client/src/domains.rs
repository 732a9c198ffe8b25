//! domains table operations

use crate::SupabaseClient;
use crate::error::Result;
use backlinkoo_core::domain::post::DomainRecord;

/// PostgREST path of the domains table
const DOMAINS_TABLE: &str = "domains";

impl SupabaseClient {
    /// Resolves a domain name to its row
    ///
    /// Accepts bare names, full URLs, and www-prefixed forms; the lookup
    /// always runs against the canonical bare name.
    ///
    /// # Returns
    /// The matching row, or `None` when the domain is not registered
    ///
    /// # Example
    /// ```no_run
    /// # use backlinkoo_client::SupabaseClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = SupabaseClient::from_env()?;
    /// if let Some(row) = client.resolve_domain("https://www.example.com/").await? {
    ///     println!("domain id {}", row.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn resolve_domain(&self, name: &str) -> Result<Option<DomainRecord>> {
        let needle = canonical_domain(name);
        let url = self.rest_url(DOMAINS_TABLE);
        let request = self
            .client
            .get(&url)
            .query(&[("select", "id,domain"), ("limit", "1")])
            .query(&[("domain", format!("eq.{needle}"))]);

        let response = self.send_guarded(request).await?;
        let rows: Vec<DomainRecord> = crate::decode_response(response).await?;
        Ok(rows.into_iter().next())
    }
}

/// Reduces user-supplied domain input to a bare lowercase host name
///
/// Strips the scheme, a leading `www.`, any path or query, the port, and
/// a trailing dot.
pub fn canonical_domain(input: &str) -> String {
    let trimmed = input.trim().to_lowercase();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(&trimmed);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    let host = without_www
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_www);
    let host = host.split(':').next().unwrap_or(host);
    host.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_pass_through() {
        assert_eq!(canonical_domain("example.com"), "example.com");
    }

    #[test]
    fn urls_are_reduced_to_hosts() {
        assert_eq!(
            canonical_domain("https://www.Example.com/blog/post?x=1"),
            "example.com"
        );
        assert_eq!(canonical_domain("http://example.com:8080/"), "example.com");
    }

    #[test]
    fn stray_whitespace_and_dots_are_trimmed() {
        assert_eq!(canonical_domain("  example.com.  "), "example.com");
    }
}
