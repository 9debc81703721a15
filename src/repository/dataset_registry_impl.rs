use crate::common::*;

use crate::model::{chat::chat_identity::*, dataset::dataset::*};

use crate::traits::repository_traits::dataset_registry::*;

#[doc = r#"
    프로세스 수명 동안만 유지되는 인메모리 데이터셋 레지스트리.

    처리량이 낮으므로 맵 전체를 하나의 Mutex 로 보호한다.
    데이터셋은 `Arc` 로 보관하여 조회 시 락을 오래 잡지 않는다.
"#]
#[derive(Debug, Default)]
pub struct DatasetRegistryImpl {
    datasets: Mutex<HashMap<ChatIdentity, Arc<Dataset>>>,
}

impl DatasetRegistryImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetRegistry for DatasetRegistryImpl {
    fn set(&self, chat: ChatIdentity, dataset: Dataset) {
        let prev: Option<Arc<Dataset>> = self.datasets.lock().insert(chat, Arc::new(dataset));

        if prev.is_some() {
            info!("[DatasetRegistryImpl->set] dataset replaced for chat {}", chat);
        } else {
            info!("[DatasetRegistryImpl->set] dataset registered for chat {}", chat);
        }
    }

    fn get(&self, chat: ChatIdentity) -> Option<Arc<Dataset>> {
        self.datasets.lock().get(&chat).cloned()
    }

    fn len(&self) -> usize {
        self.datasets.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dataset::cell_value::*;

    fn dataset_with(header: &str, value: f64) -> Dataset {
        Dataset::from_rows(vec![header.to_string()], vec![vec![CellValue::Number(value)]]).unwrap()
    }

    #[test]
    fn get_before_set_is_absent() {
        let registry: DatasetRegistryImpl = DatasetRegistryImpl::new();
        assert!(registry.get(ChatIdentity::new(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn last_write_wins_without_merge() {
        let registry: DatasetRegistryImpl = DatasetRegistryImpl::new();
        let chat: ChatIdentity = ChatIdentity::new(42);

        registry.set(chat, dataset_with("A", 1.0));
        registry.set(chat, dataset_with("B", 2.0));

        let stored: Arc<Dataset> = registry.get(chat).unwrap();
        assert_eq!(*stored, dataset_with("B", 2.0));
        assert!(stored.column("A").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn previously_borrowed_dataset_is_not_mutated_by_replace() {
        let registry: DatasetRegistryImpl = DatasetRegistryImpl::new();
        let chat: ChatIdentity = ChatIdentity::new(7);

        registry.set(chat, dataset_with("A", 1.0));
        let borrowed: Arc<Dataset> = registry.get(chat).unwrap();
        registry.set(chat, dataset_with("B", 2.0));

        assert_eq!(*borrowed, dataset_with("A", 1.0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn chats_are_isolated_under_concurrent_uploads() {
        let registry: Arc<DatasetRegistryImpl> = Arc::new(DatasetRegistryImpl::new());

        let handles: Vec<tokio::task::JoinHandle<()>> = (0..16)
            .map(|i| {
                let registry: Arc<DatasetRegistryImpl> = Arc::clone(&registry);
                tokio::spawn(async move {
                    registry.set(ChatIdentity::new(i), dataset_with("X", i as f64));
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..16 {
            let stored: Arc<Dataset> = registry.get(ChatIdentity::new(i)).unwrap();
            assert_eq!(*stored, dataset_with("X", i as f64));
        }
        assert_eq!(registry.len(), 16);
    }
}
