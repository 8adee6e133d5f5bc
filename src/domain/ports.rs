use crate::domain::model::PreferenceSet;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_path(&self) -> Option<&str>;
    fn use_fuzzy(&self) -> bool;
    fn limit(&self) -> usize;
    fn preferences(&self) -> PreferenceSet;
    fn output_path(&self) -> &str;
}
