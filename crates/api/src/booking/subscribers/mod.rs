use super::{
    create_booking::CreateBookingUseCase,
    delete_booking::DeleteBookingUseCase,
    sync_booking_reminders::{BookingOperation, SyncBookingRemindersUseCase},
    update_booking::UpdateBookingUseCase,
};
use crate::shared::usecase::{execute, Subscriber};
use bookli_domain::Booking;

pub struct ScheduleRemindersOnBookingCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateBookingUseCase> for ScheduleRemindersOnBookingCreated {
    async fn notify(&self, booking: &Booking, ctx: &bookli_infra::BookliContext) {
        let sync_booking_reminders = SyncBookingRemindersUseCase {
            booking,
            operation: BookingOperation::Created,
        };

        // Sideeffect, ignore result
        let _ = execute(sync_booking_reminders, ctx).await;
    }
}

pub struct SyncRemindersOnBookingUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateBookingUseCase> for SyncRemindersOnBookingUpdated {
    async fn notify(&self, booking: &Booking, ctx: &bookli_infra::BookliContext) {
        let sync_booking_reminders = SyncBookingRemindersUseCase {
            booking,
            operation: BookingOperation::Updated,
        };

        // Sideeffect, ignore result
        let _ = execute(sync_booking_reminders, ctx).await;
    }
}

pub struct PurgeRemindersOnBookingDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteBookingUseCase> for PurgeRemindersOnBookingDeleted {
    async fn notify(&self, booking: &Booking, ctx: &bookli_infra::BookliContext) {
        let sync_booking_reminders = SyncBookingRemindersUseCase {
            booking,
            operation: BookingOperation::Deleted,
        };

        // Sideeffect, ignore result
        let _ = execute(sync_booking_reminders, ctx).await;
    }
}
