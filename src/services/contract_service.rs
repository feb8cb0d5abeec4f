//! Motor del ciclo de vida de contratos
//!
//! Creación (validación, disponibilidad, tarificación y escrituras agrupadas),
//! cierre y consultas sobre los contratos almacenados.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::rental::RentalPolicy;
use crate::models::{Client, Contract, ContractDraft, Pricing, Vehicle};
use crate::repositories::Repositories;
use crate::services::unit_of_work::transactional;
use crate::utils::clock::Clock;
use crate::utils::errors::{AppError, AppResult};

/// Datos de entrada para abrir un contrato
#[derive(Debug, Clone, Deserialize)]
pub struct NewContract {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub duration_days: u32,
    #[serde(default)]
    pub insurance_id: Option<Uuid>,
    /// Por defecto, los defectos ya conocidos del vehículo
    #[serde(default)]
    pub initial_defects: Option<Vec<String>>,
}

pub struct ContractService {
    repos: Repositories,
    policy: RentalPolicy,
    clock: Arc<dyn Clock>,
}

impl ContractService {
    pub fn new(repos: Repositories, policy: RentalPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            repos,
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &RentalPolicy {
        &self.policy
    }

    /// Abre un contrato: el vehículo deja de estar disponible y pasa a la
    /// lista de alquileres activos del cliente
    pub fn create(&self, request: NewContract) -> AppResult<Contract> {
        let _guard = self.repos.exclusive();

        let (draft, client, vehicle) = self.draft(request)?;
        let contract = draft.sign();

        let mut renting_client = client.clone();
        renting_client.start_rental(vehicle.id);

        transactional(&self.repos, |uow| {
            uow.insert_contract(&contract)?;
            uow.set_vehicle_availability(&vehicle, false)?;
            uow.update_client(&client, &renting_client)
        })?;

        info!(
            "📝 Contrato {} abierto: {} para {} desde {} ({} días, total {}, caución {})",
            contract.id(),
            vehicle.display_name(),
            client.full_name(),
            contract.start_date(),
            contract.duration_days(),
            contract.total_cost(),
            contract.deposit()
        );

        Ok(contract)
    }

    /// Valida una solicitud y la tarifica sin escribir nada
    fn draft(&self, request: NewContract) -> AppResult<(ContractDraft, Client, Vehicle)> {
        let today = self.clock.today();
        if request.start_date < today {
            return Err(AppError::InvalidDate(format!(
                "start date {} is before today ({})",
                request.start_date, today
            )));
        }
        validate_duration(request.duration_days)?;

        let client = self
            .repos
            .clients
            .get_by_id(request.client_id)?
            .ok_or(AppError::ClientNotFound(request.client_id))?;
        let vehicle = self.vehicle(request.vehicle_id)?;
        let insurance_rate = self.insurance_rate(request.insurance_id)?;

        let end_date = expected_end(request.start_date, request.duration_days)?;
        self.ensure_available(&vehicle, request.start_date, end_date)?;

        let pricing = self
            .policy
            .pricing(vehicle.daily_price, insurance_rate, request.duration_days)?;

        let draft = ContractDraft {
            client_id: client.id,
            vehicle_id: vehicle.id,
            insurance_id: request.insurance_id,
            start_date: request.start_date,
            duration_days: request.duration_days,
            pricing,
            start_odometer_km: vehicle.odometer_km,
            initial_condition: vehicle.condition.clone(),
            initial_defects: request
                .initial_defects
                .unwrap_or_else(|| vehicle.defects.clone()),
        };

        Ok((draft, client, vehicle))
    }

    /// Disponible = indicador activo y ningún contrato abierto que solape `[start, end)`
    fn ensure_available(&self, vehicle: &Vehicle, start: NaiveDate, end: NaiveDate) -> AppResult<()> {
        if !vehicle.available {
            warn!("🚫 {} marcado como no disponible", vehicle.display_name());
            return Err(AppError::VehicleNotAvailable(vehicle.registration.clone()));
        }

        let clash = self
            .repos
            .contracts
            .find_by_vehicle(vehicle.id)?
            .into_iter()
            .find(|c| !c.is_closed() && c.overlaps(start, end));

        if let Some(existing) = clash {
            warn!(
                "🚫 {} ya reservado por el contrato {} ({} → {})",
                vehicle.display_name(),
                existing.id(),
                existing.start_date(),
                existing.expected_end_date()
            );
            return Err(AppError::VehicleNotAvailable(vehicle.registration.clone()));
        }

        Ok(())
    }

    /// Coste y caución previstos, sin crear nada
    pub fn estimate(
        &self,
        vehicle_id: Uuid,
        duration_days: u32,
        insurance_id: Option<Uuid>,
    ) -> AppResult<Pricing> {
        validate_duration(duration_days)?;
        let vehicle = self.vehicle(vehicle_id)?;
        let insurance_rate = self.insurance_rate(insurance_id)?;
        expected_end(self.clock.today(), duration_days)?;
        self.policy.pricing(vehicle.daily_price, insurance_rate, duration_days)
    }

    /// Cierra y guarda un contrato, sin tocar vehículo ni cliente
    pub fn close_contract(
        &self,
        contract_id: Uuid,
        return_date: NaiveDate,
        return_odometer_km: u64,
        return_defects: &[String],
    ) -> AppResult<Decimal> {
        let _guard = self.repos.exclusive();

        let contract = self.get(contract_id)?;
        let (closed, withheld) =
            self.closed_copy(&contract, return_date, return_odometer_km, return_defects)?;
        self.repos.contracts.save(&closed)?;

        info!("🔒 Contrato {} cerrado, retenido {}", contract_id, withheld);
        Ok(withheld)
    }

    /// Copia cerrada de `contract`; el llamador decide cómo persistirla
    pub(crate) fn closed_copy(
        &self,
        contract: &Contract,
        return_date: NaiveDate,
        return_odometer_km: u64,
        return_defects: &[String],
    ) -> AppResult<(Contract, Decimal)> {
        let mut closed = contract.clone();
        let withheld = closed.close(return_date, return_odometer_km, return_defects, &self.policy)?;
        Ok((closed, withheld))
    }

    pub fn get(&self, contract_id: Uuid) -> AppResult<Contract> {
        self.repos
            .contracts
            .get_by_id(contract_id)?
            .ok_or_else(|| AppError::ContractNotFound(contract_id.to_string()))
    }

    pub fn list(&self) -> AppResult<Vec<Contract>> {
        Ok(self.repos.contracts.list()?)
    }

    pub fn contracts_for_client(&self, client_id: Uuid) -> AppResult<Vec<Contract>> {
        Ok(self.repos.contracts.find_by_client(client_id)?)
    }

    pub fn contracts_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Contract>> {
        Ok(self.repos.contracts.find_by_vehicle(vehicle_id)?)
    }

    pub fn active_on(&self, date: NaiveDate) -> AppResult<Vec<Contract>> {
        Ok(self.repos.contracts.find_active_on_date(date)?)
    }

    /// Contratos abiertos cuya fecha de fin prevista ya pasó
    pub fn overdue_on(&self, date: NaiveDate) -> AppResult<Vec<Contract>> {
        Ok(self
            .repos
            .contracts
            .list()?
            .into_iter()
            .filter(|c| c.is_overdue(date))
            .collect())
    }

    fn vehicle(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        self.repos
            .vehicles
            .get_by_id(vehicle_id)?
            .ok_or_else(|| AppError::VehicleNotFound(vehicle_id.to_string()))
    }

    fn insurance_rate(&self, insurance_id: Option<Uuid>) -> AppResult<Option<Decimal>> {
        match insurance_id {
            Some(id) => {
                let insurance = self
                    .repos
                    .insurances
                    .get_by_id(id)?
                    .ok_or(AppError::InsuranceNotFound(id))?;
                Ok(Some(insurance.daily_rate()))
            }
            None => Ok(None),
        }
    }
}

fn validate_duration(duration_days: u32) -> AppResult<()> {
    if duration_days == 0 {
        return Err(AppError::InvalidDuration(
            "duration must be at least one day".to_string(),
        ));
    }
    Ok(())
}

/// Fin previsto `start + duration`; una fecha fuera del calendario es una duración inválida
fn expected_end(start: NaiveDate, duration_days: u32) -> AppResult<NaiveDate> {
    start
        .checked_add_days(Days::new(u64::from(duration_days)))
        .ok_or_else(|| {
            AppError::InvalidDuration(format!(
                "{} days from {} is beyond the supported calendar",
                duration_days, start
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::models::client::CreateClientRequest;
    use crate::models::insurance::{CreateInsuranceRequest, Insurance};
    use crate::models::vehicle::CreateVehicleRequest;
    use crate::utils::clock::FixedClock;
    use crate::utils::errors::ErrorKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn setup() -> (ContractService, Repositories, Client, Vehicle) {
        let repos = Repositories::in_memory();
        let service = ContractService::new(
            repos.clone(),
            RentalPolicy::default(),
            Arc::new(FixedClock(today())),
        );

        let client = Client::from_request(CreateClientRequest {
            last_name: "Martin".to_string(),
            first_name: "Claire".to_string(),
            license_number: "B1234567".to_string(),
            phone: "0612345678".to_string(),
            email: "claire.martin@example.com".to_string(),
        });
        repos.clients.save(&client).unwrap();

        let vehicle = Vehicle::from_request(CreateVehicleRequest {
            brand: "Renault".to_string(),
            model: "Clio".to_string(),
            year: 2021,
            registration: "AB-123-CD".to_string(),
            odometer_km: 42_000,
            daily_price: Decimal::new(5000, 2),
            condition: "Nickel".to_string(),
            vehicle_type: "citadine".to_string(),
            defects: Some(vec!["scratch".to_string()]),
        });
        repos.vehicles.save(&vehicle).unwrap();

        (service, repos, client, vehicle)
    }

    fn request(client: &Client, vehicle: &Vehicle, start: NaiveDate, days: u32) -> NewContract {
        NewContract {
            client_id: client.id,
            vehicle_id: vehicle.id,
            start_date: start,
            duration_days: days,
            insurance_id: None,
            initial_defects: None,
        }
    }

    #[test]
    fn test_create_prices_and_reserves() {
        let (service, repos, client, vehicle) = setup();

        let contract = service.create(request(&client, &vehicle, today(), 7)).unwrap();

        assert_eq!(contract.total_cost(), Decimal::new(35000, 2));
        assert_eq!(contract.deposit(), Decimal::new(3500, 2));
        assert_eq!(contract.start_odometer_km(), 42_000);
        assert_eq!(contract.initial_condition(), "Nickel");
        assert_eq!(contract.initial_defects(), &["scratch".to_string()]);

        assert!(!repos.vehicles.get_by_id(vehicle.id).unwrap().unwrap().available);
        assert!(repos.clients.get_by_id(client.id).unwrap().unwrap().has_rented(vehicle.id));
        assert_eq!(service.get(contract.id()).unwrap(), contract);
    }

    #[test]
    fn test_create_with_insurance() {
        let (service, repos, client, vehicle) = setup();
        let insurance = Insurance::from_request(CreateInsuranceRequest {
            name: "Tous risques".to_string(),
            daily_rate: Decimal::new(1000, 2),
        });
        repos.insurances.save(&insurance).unwrap();

        let mut req = request(&client, &vehicle, today(), 7);
        req.insurance_id = Some(insurance.id());
        let contract = service.create(req).unwrap();

        assert_eq!(contract.total_cost(), Decimal::new(42000, 2));
        assert_eq!(contract.deposit(), Decimal::new(4200, 2));
        assert!(contract.is_insured());
    }

    #[test]
    fn test_create_rejects_past_date_and_zero_duration() {
        let (service, _, client, vehicle) = setup();
        let yesterday = today().pred_opt().unwrap();

        let err = service.create(request(&client, &vehicle, yesterday, 3)).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));

        let err = service.create(request(&client, &vehicle, today(), 0)).unwrap_err();
        assert!(matches!(err, AppError::InvalidDuration(_)));
    }

    #[test]
    fn test_create_unknown_references() {
        let (service, _, client, vehicle) = setup();

        let mut req = request(&client, &vehicle, today(), 3);
        req.client_id = Uuid::new_v4();
        assert!(matches!(service.create(req).unwrap_err(), AppError::ClientNotFound(_)));

        let mut req = request(&client, &vehicle, today(), 3);
        req.vehicle_id = Uuid::new_v4();
        assert!(matches!(service.create(req).unwrap_err(), AppError::VehicleNotFound(_)));

        let mut req = request(&client, &vehicle, today(), 3);
        req.insurance_id = Some(Uuid::new_v4());
        assert!(matches!(service.create(req).unwrap_err(), AppError::InsuranceNotFound(_)));
    }

    #[test]
    fn test_second_contract_on_rented_vehicle_is_refused() {
        let (service, _, client, vehicle) = setup();
        service.create(request(&client, &vehicle, today(), 7)).unwrap();

        let later = today() + Duration::days(30);
        let err = service.create(request(&client, &vehicle, later, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(matches!(err, AppError::VehicleNotAvailable(_)));
    }

    #[test]
    fn test_overlap_with_open_contract_is_refused_even_if_flag_is_set() {
        let (service, repos, client, vehicle) = setup();
        service.create(request(&client, &vehicle, today(), 7)).unwrap();
        repos.vehicles.set_availability(vehicle.id, true).unwrap();

        let err = service
            .create(request(&client, &vehicle, today() + Duration::days(6), 2))
            .unwrap_err();
        assert!(matches!(err, AppError::VehicleNotAvailable(_)));

        // [start, end) exclusivo: empieza justo el día de fin previsto
        let back_to_back = service.create(request(&client, &vehicle, today() + Duration::days(7), 2));
        assert!(back_to_back.is_ok());
    }

    #[test]
    fn test_estimate_does_not_write() {
        let (service, repos, _, vehicle) = setup();

        let pricing = service.estimate(vehicle.id, 7, None).unwrap();
        assert_eq!(pricing.total_cost, Decimal::new(35000, 2));
        assert_eq!(pricing.deposit, Decimal::new(3500, 2));
        assert!(repos.contracts.list().unwrap().is_empty());

        assert!(matches!(
            service.estimate(vehicle.id, 0, None).unwrap_err(),
            AppError::InvalidDuration(_)
        ));
        assert!(matches!(
            service.estimate(vehicle.id, u32::MAX, None).unwrap_err(),
            AppError::InvalidDuration(_)
        ));
    }

    #[test]
    fn test_huge_duration_is_rejected_without_writes() {
        let (service, repos, client, vehicle) = setup();

        let err = service
            .create(request(&client, &vehicle, today(), u32::MAX))
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidDuration(_)));
        assert!(repos.contracts.list().unwrap().is_empty());
        assert!(repos.vehicles.get_by_id(vehicle.id).unwrap().unwrap().available);
    }

    #[test]
    fn test_price_overflow_is_rejected_without_writes() {
        let (service, repos, client, mut vehicle) = setup();
        vehicle.daily_price = Decimal::MAX;
        repos.vehicles.save(&vehicle).unwrap();

        assert!(matches!(
            service.estimate(vehicle.id, 2, None).unwrap_err(),
            AppError::InvalidPrice(_)
        ));
        let err = service.create(request(&client, &vehicle, today(), 2)).unwrap_err();
        assert!(matches!(err, AppError::InvalidPrice(_)));
        assert!(repos.contracts.list().unwrap().is_empty());
        assert!(repos.clients.get_by_id(client.id).unwrap().unwrap().active_rentals.is_empty());
    }

    #[test]
    fn test_close_contract_once() {
        let (service, _, client, vehicle) = setup();
        let contract = service.create(request(&client, &vehicle, today(), 7)).unwrap();
        let returned = vec!["scratch".to_string(), "dent".to_string()];

        let withheld = service
            .close_contract(contract.id(), today() + Duration::days(7), 42_500, &returned)
            .unwrap();
        assert_eq!(withheld, Decimal::new(350, 2));

        let closed = service.get(contract.id()).unwrap();
        assert!(closed.is_closed());
        assert_eq!(closed.return_report().unwrap().new_defects, vec!["dent".to_string()]);

        let err = service
            .close_contract(contract.id(), today() + Duration::days(7), 42_500, &returned)
            .unwrap_err();
        assert!(matches!(err, AppError::ContractAlreadyClosed(_)));
    }

    #[test]
    fn test_queries() {
        let (service, _, client, vehicle) = setup();
        let contract = service.create(request(&client, &vehicle, today(), 3)).unwrap();

        assert_eq!(service.contracts_for_client(client.id).unwrap().len(), 1);
        assert_eq!(service.contracts_for_vehicle(vehicle.id).unwrap().len(), 1);
        assert_eq!(service.active_on(today() + Duration::days(2)).unwrap().len(), 1);
        assert!(service.active_on(today() + Duration::days(3)).unwrap().is_empty());
        assert!(service.overdue_on(today() + Duration::days(3)).unwrap().is_empty());
        assert_eq!(service.overdue_on(today() + Duration::days(4)).unwrap()[0].id(), contract.id());
        assert!(matches!(
            service.get(Uuid::new_v4()).unwrap_err(),
            AppError::ContractNotFound(_)
        ));
    }
}
