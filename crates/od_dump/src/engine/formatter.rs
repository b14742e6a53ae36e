use alloc::format;
use alloc::string::String;

use crate::Dump;
use crate::info::{MethodInfo, MethodReceiver, ParamType, TypeInfo};
use crate::policy::FormatterRef;
use crate::registry::ClassDumpInfo;

/// Projects `value` onto the level of `target` in its base chain.
fn project<'a>(value: &'a dyn Dump, target: &TypeInfo) -> Option<&'a dyn Dump> {
    let mut info = value.dump_type_info();
    let mut current = value;
    loop {
        if info.type_id() == target.type_id() {
            return Some(current);
        }
        let base = info.base()?;
        current = base.project(current)?;
        info = base.type_info();
    }
}

fn param_of(method: &MethodInfo) -> Option<ParamType> {
    match method.receiver() {
        MethodReceiver::Static(param) => Some(param),
        MethodReceiver::Instance => None,
    }
}

/// Calls a static method of `owner` named `name` taking `value`.
///
/// A method whose parameter is exactly the value's type wins over the first
/// one accepting it through a base type.
fn call_static(owner: &TypeInfo, name: &str, value: &dyn Dump) -> Option<String> {
    let value_type = value.dump_type_info();
    let statics = || owner.methods_named(name).filter_map(|m| Some((m, param_of(m)?)));

    if let Some((method, _)) = statics().find(|(_, param)| param.is_exactly(value_type)) {
        return method.invoke(value);
    }
    let (method, param) = statics().find(|(_, param)| param.accepts(value_type))?;
    match param {
        ParamType::Exact(target) => method.invoke(project(value, target.get())?),
        ParamType::Any => method.invoke(value),
    }
}

/// Calls an instance method named `name` on the value's type or a base.
fn call_instance(name: &str, value: &dyn Dump) -> Option<String> {
    value.dump_type_info().ancestors().find_map(|level| {
        let method = level
            .methods_named(name)
            .find(|method| !method.is_static())?;
        method.invoke(project(value, level)?)
    })
}

/// Renders `value` through a user formatter.
///
/// An unresolvable formatter renders a placeholder naming the expected
/// signature.
pub(super) fn format(
    value: &dyn Dump,
    formatter: FormatterRef,
    declaring: Option<&ClassDumpInfo>,
) -> String {
    let value_type = value.dump_type_info();
    let name = formatter.method;

    let found = match formatter.target {
        Some(target) => call_static(target.get(), name, value),
        None => call_instance(name, value).or_else(|| {
            let declaring = declaring?;
            call_static(declaring.type_info(), name, value).or_else(|| {
                declaring
                    .has_shadow()
                    .then(|| call_static(declaring.shadow(), name, value))
                    .flatten()
            })
        }),
    };
    if let Some(text) = found {
        return text;
    }

    let signature = match formatter.target {
        Some(target) => format!(
            "{}::{name}(&{}) -> String",
            target.get().type_name(),
            value_type.type_name()
        ),
        None => format!("{}::{name}(&self) -> String", value_type.type_name()),
    };
    log::warn!("formatter not found: {signature}");
    format!("<formatter not found: {signature}>")
}

#[cfg(test)]
mod tests {
    use super::{call_instance, call_static, format, project};
    use crate::Dump;
    use crate::info::{MethodInfo, TypeInfo, TypeInfoCell, Typed};
    use crate::policy::FormatterRef;
    use crate::registry::ClassDumpInfo;

    #[derive(Dump)]
    #[dump(methods(short))]
    struct Vehicle {
        wheels: u8,
    }

    impl Vehicle {
        fn short(&self) -> String {
            format!("{} wheels", self.wheels)
        }
    }

    #[derive(Dump)]
    struct Bike {
        #[dump(base)]
        vehicle: Vehicle,
        gears: u8,
    }

    struct Formats;

    impl Typed for Formats {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::opaque::<Formats>().with_methods([
                    MethodInfo::with_param::<Vehicle, _>("label", |v| format!("vehicle {}", v.wheels)),
                    MethodInfo::with_param::<Bike, _>("label", |b| format!("bike {}", b.gears)),
                    MethodInfo::with_any("any", |v| v.dump_type_info().type_name().to_owned()),
                ])
            })
        }
    }

    fn bike() -> Bike {
        Bike {
            vehicle: Vehicle { wheels: 2 },
            gears: 21,
        }
    }

    #[test]
    fn projection_walks_the_base_chain() {
        let bike = bike();
        let vehicle = project(&bike, Vehicle::type_info()).unwrap();
        assert!(vehicle.is::<Vehicle>());
        assert!(project(&bike.vehicle, Bike::type_info()).is_none());
    }

    #[test]
    fn exact_parameter_wins() {
        let bike = bike();
        let formats = Formats::type_info();
        assert_eq!(call_static(formats, "label", &bike).as_deref(), Some("bike 21"));
        assert_eq!(
            call_static(formats, "label", &bike.vehicle).as_deref(),
            Some("vehicle 2")
        );
        assert_eq!(call_static(formats, "any", &7_u8).as_deref(), Some("u8"));
        assert_eq!(call_static(formats, "label", &7_u8), None);
    }

    #[test]
    fn instance_methods_of_bases() {
        assert_eq!(call_instance("short", &bike()).as_deref(), Some("2 wheels"));
        assert_eq!(call_instance("missing", &bike()), None);
    }

    #[test]
    fn missing_formatter_placeholder() {
        let text = format(&7_u8, FormatterRef::on::<Formats>("nope"), None);
        assert_eq!(text, "<formatter not found: Formats::nope(&u8) -> String>");
        let text = format(&7_u8, FormatterRef::method("nope"), None);
        assert_eq!(text, "<formatter not found: u8::nope(&self) -> String>");

        let declaring = ClassDumpInfo::from_annotations(Formats::type_info());
        let text = format(&bike(), FormatterRef::method("label"), Some(&declaring));
        assert_eq!(text, "bike 21");
    }
}
