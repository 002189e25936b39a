use admin_portal::{
    FsViewLoader, MockViewLoader, ModuleRegistry, PortalError,
    loader::{LoaderState, ViewLoader},
};
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success() {
        let mock = MockViewLoader::new();
        let view = mock.load("/pages/brand/index.tsx").await.unwrap();

        assert_eq!(view.module_id, "/pages/brand/index.tsx");
        assert!(view.source.contains("pages/brand/index.tsx"));
        assert_eq!(mock.load_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockViewLoader::new_failing();
        let result = mock.load("/pages/brand/index.tsx").await;

        assert!(matches!(result, Err(PortalError::Load { .. })));
    }
}

#[cfg(test)]
mod lazy_view_tests {
    use super::*;

    fn single_module(loader: &MockViewLoader) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register("/pages/brand/index.tsx", Arc::new(loader.clone()) as LoaderState);
        registry
    }

    #[tokio::test]
    async fn test_view_is_loaded_once_and_memoized() {
        let loader = MockViewLoader::new();
        let registry = single_module(&loader);
        let view = registry.get("/pages/brand/index.tsx").unwrap();

        assert!(!view.is_resolved());
        let first = view.resolve().await.unwrap();
        let second = view.resolve().await.unwrap();

        assert!(view.is_resolved());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.load_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_share_one_load() {
        let loader = MockViewLoader::with_delay(Duration::from_millis(50));
        let registry = single_module(&loader);
        let view = registry.get("/pages/brand/index.tsx").unwrap().clone();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let view = view.clone();
                tokio::spawn(async move { view.resolve().await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(loader.load_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let loader = MockViewLoader::new_failing();
        let registry = single_module(&loader);
        let view = registry.get("/pages/brand/index.tsx").unwrap();

        assert!(view.resolve().await.is_err());
        assert!(!view.is_resolved());
        assert!(view.resolve().await.is_err());
        assert_eq!(loader.load_count(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_registration_keeps_first_loader() {
        let first = MockViewLoader::new();
        let second = MockViewLoader::new();
        let mut registry = ModuleRegistry::new();
        registry.register("pages/brand/index.tsx", Arc::new(first.clone()) as LoaderState);
        registry.register("/pages/brand/index.tsx", Arc::new(second.clone()) as LoaderState);

        assert_eq!(registry.len(), 1);
        registry
            .get("pages/brand/index.tsx")
            .unwrap()
            .resolve()
            .await
            .unwrap();
        assert_eq!(first.load_count(), 1);
        assert_eq!(second.load_count(), 0);
    }
}

#[cfg(test)]
mod fs_tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_loader_reads_page_source() {
        let dir = tempfile::tempdir().unwrap();
        let page_dir = dir.path().join("pages/brand");
        std::fs::create_dir_all(&page_dir).unwrap();
        std::fs::write(page_dir.join("index.tsx"), "export default BrandHome;").unwrap();

        let loader = FsViewLoader::new(dir.path());
        let view = loader.load("/pages/brand/index.tsx").await.unwrap();

        assert_eq!(view.source, "export default BrandHome;");
    }

    #[tokio::test]
    async fn test_fs_loader_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FsViewLoader::new(dir.path());

        let result = loader.load("/pages/brand/missing.tsx").await;

        assert!(matches!(result, Err(PortalError::Load { .. })));
    }
}
