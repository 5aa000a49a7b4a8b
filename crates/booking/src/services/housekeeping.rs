//! Housekeeping dispatch trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use common::EntityId;
use domain::HousekeepingTask;

use crate::error::BookingError;

/// Trait for housekeeping task dispatch.
///
/// Checkout cleaning dispatch is idempotent per reservation: repeating the
/// call for the same reservation returns the task already scheduled.
#[async_trait]
pub trait HousekeepingService: Send + Sync {
    /// Schedules the pending cleaning task fired by a checkout.
    async fn schedule_checkout_cleaning(
        &self,
        room_id: EntityId,
        reservation_id: EntityId,
    ) -> Result<HousekeepingTask, BookingError>;

    /// Cancels a previously scheduled task (compensation path).
    async fn cancel(&self, task_id: EntityId) -> Result<(), BookingError>;
}

#[derive(Debug, Default)]
struct InMemoryHousekeepingState {
    tasks: HashMap<EntityId, HousekeepingTask>,
    by_reservation: HashMap<EntityId, EntityId>,
    fail_on_schedule: bool,
}

/// In-memory housekeeping service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHousekeepingService {
    state: Arc<RwLock<InMemoryHousekeepingState>>,
}

impl InMemoryHousekeepingService {
    /// Creates a new in-memory housekeeping service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next schedule call.
    pub fn set_fail_on_schedule(&self, fail: bool) {
        self.state.write().unwrap().fail_on_schedule = fail;
    }

    /// Returns the number of scheduled tasks.
    pub fn task_count(&self) -> usize {
        self.state.read().unwrap().tasks.len()
    }

    /// Returns all tasks scheduled for a room.
    pub fn tasks_for_room(&self, room_id: EntityId) -> Vec<HousekeepingTask> {
        self.state
            .read()
            .unwrap()
            .tasks
            .values()
            .filter(|t| t.room_id == room_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HousekeepingService for InMemoryHousekeepingService {
    async fn schedule_checkout_cleaning(
        &self,
        room_id: EntityId,
        reservation_id: EntityId,
    ) -> Result<HousekeepingTask, BookingError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_schedule {
            return Err(BookingError::Housekeeping(
                "Housekeeping unavailable".to_string(),
            ));
        }

        // Idempotency: one checkout cleaning per reservation
        if let Some(existing_id) = state.by_reservation.get(&reservation_id)
            && let Some(existing) = state.tasks.get(existing_id)
        {
            return Ok(existing.clone());
        }

        let task = HousekeepingTask::cleaning(room_id, Utc::now());
        state.by_reservation.insert(reservation_id, task.id);
        state.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn cancel(&self, task_id: EntityId) -> Result<(), BookingError> {
        let mut state = self.state.write().unwrap();
        if state.tasks.remove(&task_id).is_some() {
            state.by_reservation.retain(|_, id| *id != task_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{TaskStatus, TaskType};

    #[tokio::test]
    async fn test_schedule_and_cancel() {
        let service = InMemoryHousekeepingService::new();
        let room_id = EntityId::new();
        let reservation_id = EntityId::new();

        let task = service
            .schedule_checkout_cleaning(room_id, reservation_id)
            .await
            .unwrap();

        assert_eq!(task.room_id, room_id);
        assert_eq!(task.task_type, TaskType::Cleaning);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(service.task_count(), 1);

        service.cancel(task.id).await.unwrap();
        assert_eq!(service.task_count(), 0);
    }

    #[tokio::test]
    async fn test_schedule_is_idempotent_per_reservation() {
        let service = InMemoryHousekeepingService::new();
        let room_id = EntityId::new();
        let reservation_id = EntityId::new();

        let first = service
            .schedule_checkout_cleaning(room_id, reservation_id)
            .await
            .unwrap();
        let second = service
            .schedule_checkout_cleaning(room_id, reservation_id)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(service.task_count(), 1);
    }

    #[tokio::test]
    async fn test_fail_on_schedule() {
        let service = InMemoryHousekeepingService::new();
        service.set_fail_on_schedule(true);

        let result = service
            .schedule_checkout_cleaning(EntityId::new(), EntityId::new())
            .await;

        assert!(result.is_err());
        assert_eq!(service.task_count(), 0);
    }

    #[tokio::test]
    async fn test_tasks_for_room_filters() {
        let service = InMemoryHousekeepingService::new();
        let room_a = EntityId::new();
        let room_b = EntityId::new();

        service
            .schedule_checkout_cleaning(room_a, EntityId::new())
            .await
            .unwrap();
        service
            .schedule_checkout_cleaning(room_b, EntityId::new())
            .await
            .unwrap();

        assert_eq!(service.tasks_for_room(room_a).len(), 1);
        assert_eq!(service.tasks_for_room(room_b).len(), 1);
    }
}
