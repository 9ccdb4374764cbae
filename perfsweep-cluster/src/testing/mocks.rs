//! Mock cluster client using the mockall framework

use async_trait::async_trait;
use mockall::mock;
use std::path::Path;
use std::time::Duration;

use crate::client::{ClusterClient, LogTarget, ResourceQuery, WaitTarget};
use crate::error::ClusterResult;

mock! {
    pub Cluster {}

    #[async_trait]
    impl ClusterClient for Cluster {
        async fn apply_namespace(&self, path: &Path) -> ClusterResult<()>;
        async fn set_active_namespace(&self, name: &str) -> ClusterResult<()>;
        async fn create_config_object(&self, name: &str, source_folder: &Path) -> ClusterResult<()>;
        async fn delete_config_object(&self, name: &str) -> ClusterResult<()>;
        async fn delete_resource(&self, path: &Path) -> ClusterResult<()>;
        async fn apply_resource(&self, path: &Path) -> ClusterResult<()>;
        async fn wait_for_condition(
            &self,
            target: &WaitTarget,
            condition: &str,
            timeout: Duration,
        ) -> ClusterResult<()>;
        async fn get_formatted(&self, query: &ResourceQuery) -> ClusterResult<Vec<u8>>;
        async fn get_logs(&self, target: &LogTarget) -> ClusterResult<Vec<u8>>;
    }
}
