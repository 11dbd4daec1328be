use crate::inventory::domain::{
    Policy, RelationalCredentials, Severity, TargetType, TargetTypeFilter, TenantContext,
};
use crate::ports::outbound::{ClientFactory, PolicyRepository};
use crate::shared::{AssetError, AssetResult, BackendError, Collaborator, RequestContext};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, QueryBuilder};
use std::time::Duration;

/// Policies applicable to a target type. A policy scoped to a plugin only
/// counts when an account of that platform exists.
const POLICY_SCOPE_SQL: &str = "\
FROM cf_PolicyTable p \
LEFT JOIN cf_PolicyParams pp ON p.policyId = pp.policyId AND pp.paramKey = 'pluginType' \
LEFT JOIN cf_Accounts a ON pp.paramValue = a.platform \
WHERE p.targetType = ? \
AND ((a.platform IS NULL AND pp.policyId IS NULL) OR (a.platform IS NOT NULL AND pp.policyId IS NOT NULL))";

const CLOUD_PROVIDERS_SQL: &str = "SELECT source FROM plugins WHERE type = 'Cloud Provider'";

#[derive(Debug, sqlx::FromRow)]
struct PolicyRow {
    #[sqlx(rename = "policyId")]
    policy_id: String,
    #[sqlx(rename = "policyDisplayName")]
    display_name: Option<String>,
    category: Option<String>,
    severity: Option<String>,
}

impl PolicyRow {
    fn into_policy(self, target_type: &str) -> Result<Policy, BackendError> {
        let raw = self.severity.unwrap_or_default();
        let severity: Severity = raw
            .parse()
            .map_err(|e: String| BackendError::decode(format!("policy '{}'", self.policy_id), e))?;
        Ok(Policy::new(
            self.policy_id,
            self.display_name.unwrap_or_default(),
            severity,
            self.category.unwrap_or_default(),
            target_type,
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TargetTypeRow {
    name: String,
    #[sqlx(rename = "displayName")]
    display_name: Option<String>,
    category: Option<String>,
    provider: Option<String>,
    domain: Option<String>,
}

impl From<TargetTypeRow> for TargetType {
    fn from(row: TargetTypeRow) -> Self {
        TargetType {
            name: row.name,
            display_name: row.display_name.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            provider: row.provider.unwrap_or_default(),
            domain: row.domain.unwrap_or_default(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProviderRow {
    source: Option<String>,
}

/// MySqlPolicyRepository adapter over a tenant's relational catalog
pub struct MySqlPolicyRepository {
    pool: MySqlPool,
}

impl MySqlPolicyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn enabled_policies_sql() -> String {
        format!(
            "SELECT p.policyId, p.policyDisplayName, p.category, p.severity {} \
             AND p.status = 'ENABLED' ORDER BY p.policyId",
            POLICY_SCOPE_SQL
        )
    }

    fn count_policies_sql() -> String {
        format!("SELECT COUNT(p.policyId) {}", POLICY_SCOPE_SQL)
    }

    /// Builds the target-type query. Returns `None` when the filter names an
    /// empty set of types, which can match nothing.
    fn target_types_query(filter: &TargetTypeFilter) -> Option<QueryBuilder<'static, MySql>> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT DISTINCT targetName AS name, displayName, category, \
             dataSourceName AS provider, domain \
             FROM cf_Target \
             WHERE (status = 'active' OR status = 'enabled')",
        );

        if let Some(names) = &filter.names {
            if names.is_empty() {
                return None;
            }
            builder.push(" AND targetName IN (");
            let mut separated = builder.separated(", ");
            for name in names {
                separated.push_bind(name.clone());
            }
            separated.push_unseparated(")");
        }

        if let Some(provider) = &filter.provider {
            builder.push(" AND LOWER(dataSourceName) = ");
            builder.push_bind(provider.trim().to_lowercase());
        }

        if let Some(domain) = &filter.domain {
            builder.push(" AND LOWER(domain) = ");
            builder.push_bind(domain.trim().to_lowercase());
        }

        builder.push(
            " AND dataSourceName IN \
             (SELECT DISTINCT platform FROM cf_Accounts WHERE accountStatus = 'configured') \
             ORDER BY LOWER(displayName) ASC",
        );
        Some(builder)
    }

    fn to_asset_error(err: BackendError) -> AssetError {
        AssetError::backend(Collaborator::RelationalBackend, err)
    }
}

#[async_trait]
impl PolicyRepository for MySqlPolicyRepository {
    async fn enabled_policies(
        &self,
        ctx: &RequestContext,
        target_type: &str,
    ) -> AssetResult<Vec<Policy>> {
        let sql = Self::enabled_policies_sql();
        let rows = ctx
            .run(
                sqlx::query_as::<_, PolicyRow>(&sql)
                    .bind(target_type)
                    .fetch_all(&self.pool),
            )
            .await
            .map_err(Self::to_asset_error)?;

        rows.into_iter()
            .map(|row| row.into_policy(target_type))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Self::to_asset_error)
    }

    async fn count_policies(&self, ctx: &RequestContext, target_type: &str) -> AssetResult<u64> {
        let sql = Self::count_policies_sql();
        let count: i64 = ctx
            .run(
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(target_type)
                    .fetch_one(&self.pool),
            )
            .await
            .map_err(Self::to_asset_error)?;

        u64::try_from(count).map_err(|e| {
            Self::to_asset_error(BackendError::decode("policy count", e))
        })
    }

    async fn target_types(
        &self,
        ctx: &RequestContext,
        filter: &TargetTypeFilter,
    ) -> AssetResult<Vec<TargetType>> {
        let Some(mut builder) = Self::target_types_query(filter) else {
            return Ok(Vec::new());
        };
        let rows = ctx
            .run(
                builder
                    .build_query_as::<TargetTypeRow>()
                    .fetch_all(&self.pool),
            )
            .await
            .map_err(Self::to_asset_error)?;

        Ok(rows.into_iter().map(TargetType::from).collect())
    }

    async fn cloud_providers(&self, ctx: &RequestContext) -> AssetResult<Vec<String>> {
        let rows = ctx
            .run(sqlx::query_as::<_, ProviderRow>(CLOUD_PROVIDERS_SQL).fetch_all(&self.pool))
            .await
            .map_err(Self::to_asset_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.source)
            .filter(|source| !source.trim().is_empty())
            .collect())
    }
}

/// Builds one lazily connected MySQL pool per tenant
///
/// Requires relational credentials in the tenant's secret. No connection is
/// opened until the first query runs.
pub struct MySqlPolicyRepositoryFactory {
    max_connections: u32,
    acquire_timeout: Duration,
}

impl MySqlPolicyRepositoryFactory {
    pub fn new(max_connections: u32, acquire_timeout: Duration) -> Self {
        Self {
            max_connections: max_connections.max(1),
            acquire_timeout,
        }
    }

    fn connect_options(credentials: &RelationalCredentials) -> Result<MySqlConnectOptions, BackendError> {
        let port = credentials.port_number().ok_or_else(|| {
            BackendError::Configuration(format!(
                "relational port '{}' is not a valid port number",
                credentials.port
            ))
        })?;
        if credentials.host.trim().is_empty() {
            return Err(BackendError::Configuration(
                "relational host must be present".to_string(),
            ));
        }

        Ok(MySqlConnectOptions::new()
            .host(credentials.host.trim())
            .port(port)
            .username(&credentials.username)
            .password(&credentials.password)
            .database(&credentials.database))
    }
}

#[async_trait]
impl ClientFactory for MySqlPolicyRepositoryFactory {
    type Client = MySqlPolicyRepository;

    async fn create(
        &self,
        _ctx: &RequestContext,
        tenant: &TenantContext,
    ) -> AssetResult<Self::Client> {
        let credentials = tenant.credentials.relational().ok_or_else(|| {
            MySqlPolicyRepository::to_asset_error(BackendError::Configuration(
                "tenant secret does not hold relational credentials".to_string(),
            ))
        })?;
        let options =
            Self::connect_options(credentials).map_err(MySqlPolicyRepository::to_asset_error)?;

        tracing::debug!(
            tenant = %tenant.tenant_id,
            host = %credentials.host,
            database = %credentials.database,
            "creating relational pool"
        );
        let pool = MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect_lazy_with(options);

        Ok(MySqlPolicyRepository::new(pool))
    }
}
