use async_trait::async_trait;
use chrono::NaiveDate;
use common::EntityId;
use domain::{Money, Reservation, ReservationStatus, Room, RoomStatus, RoomType, StayDates};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Result,
    StoreError,
    store::{ReservationStore, RoomStore},
};

/// PostgreSQL-backed document store implementing both store traits.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_room(row: PgRow) -> Result<Room> {
        let type_str: String = row.try_get("room_type")?;
        let room_type = RoomType::parse(&type_str).ok_or(StoreError::InvalidField {
            field: "room_type",
            value: type_str,
        })?;

        let status_str: String = row.try_get("status")?;
        let status = RoomStatus::parse(&status_str).ok_or(StoreError::InvalidField {
            field: "status",
            value: status_str,
        })?;

        Ok(Room {
            id: EntityId::from_uuid(row.try_get::<Uuid, _>("id")?),
            number: row.try_get("number")?,
            room_type,
            price_per_night: Money::from_cents(row.try_get("price_per_night_cents")?),
            floor: row.try_get::<i64, _>("floor")? as u32,
            beds: row.try_get::<i64, _>("beds")? as u32,
            status,
        })
    }

    fn row_to_reservation(row: PgRow) -> Result<Reservation> {
        let status_str: String = row.try_get("status")?;
        let status = ReservationStatus::parse(&status_str).ok_or(StoreError::InvalidField {
            field: "status",
            value: status_str,
        })?;

        let check_in: NaiveDate = row.try_get("check_in")?;
        let check_out: NaiveDate = row.try_get("check_out")?;
        let dates = StayDates::new(check_in, check_out).map_err(|_| StoreError::InvalidField {
            field: "check_out",
            value: check_out.to_string(),
        })?;

        Ok(Reservation {
            id: EntityId::from_uuid(row.try_get::<Uuid, _>("id")?),
            guest_id: EntityId::from_uuid(row.try_get::<Uuid, _>("guest_id")?),
            room_id: EntityId::from_uuid(row.try_get::<Uuid, _>("room_id")?),
            dates,
            status,
            total_amount: Money::from_cents(row.try_get("total_amount_cents")?),
        })
    }
}

#[async_trait]
impl RoomStore for PostgresStore {
    async fn insert(&self, room: &Room) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, number, room_type, price_per_night_cents, floor, beds, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(room.id.as_uuid())
        .bind(&room.number)
        .bind(room.room_type.as_str())
        .bind(room.price_per_night.cents())
        .bind(i64::from(room.floor))
        .bind(i64::from(room.beds))
        .bind(room.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Unique index on rooms.number backs the global-uniqueness invariant
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("rooms_number_key")
            {
                return StoreError::DuplicateRoomNumber {
                    number: room.number.clone(),
                };
            }
            StoreError::Database(e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Room>> {
        let row = sqlx::query(
            r#"
            SELECT id, number, room_type, price_per_night_cents, floor, beds, status
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_room).transpose()
    }

    async fn update_status(&self, id: EntityId, status: RoomStatus) -> Result<()> {
        sqlx::query("UPDATE rooms SET status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Room>> {
        let rows = sqlx::query(
            r#"
            SELECT id, number, room_type, price_per_night_cents, floor, beds, status
            FROM rooms
            ORDER BY number ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_room).collect()
    }
}

#[async_trait]
impl ReservationStore for PostgresStore {
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reservations (id, guest_id, room_id, check_in, check_out, status, total_amount_cents)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation.id.as_uuid())
        .bind(reservation.guest_id.as_uuid())
        .bind(reservation.room_id.as_uuid())
        .bind(reservation.dates.check_in())
        .bind(reservation.dates.check_out())
        .bind(reservation.status.as_str())
        .bind(reservation.total_amount.cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Reservation>> {
        let row = sqlx::query(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, status, total_amount_cents
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_reservation).transpose()
    }

    async fn update(&self, reservation: &Reservation) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE reservations
            SET guest_id = $2, room_id = $3, check_in = $4, check_out = $5,
                status = $6, total_amount_cents = $7
            WHERE id = $1
            "#,
        )
        .bind(reservation.id.as_uuid())
        .bind(reservation.guest_id.as_uuid())
        .bind(reservation.room_id.as_uuid())
        .bind(reservation.dates.check_in())
        .bind(reservation.dates.check_out())
        .bind(reservation.status.as_str())
        .bind(reservation.total_amount.cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_overlapping(
        &self,
        room_id: EntityId,
        dates: &StayDates,
        exclude: Option<EntityId>,
    ) -> Result<Vec<Reservation>> {
        // Half-open interval intersection pushed down to SQL
        let rows = sqlx::query(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, status, total_amount_cents
            FROM reservations
            WHERE room_id = $1
              AND status <> 'canceled'
              AND check_in < $3
              AND check_out > $2
              AND ($4::uuid IS NULL OR id <> $4)
            ORDER BY check_in ASC
            "#,
        )
        .bind(room_id.as_uuid())
        .bind(dates.check_in())
        .bind(dates.check_out())
        .bind(exclude.map(|id| id.as_uuid()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_reservation).collect()
    }

    async fn find_by_guest(&self, guest_id: EntityId) -> Result<Vec<Reservation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, status, total_amount_cents
            FROM reservations
            WHERE guest_id = $1
            ORDER BY check_in DESC
            "#,
        )
        .bind(guest_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_reservation).collect()
    }
}
