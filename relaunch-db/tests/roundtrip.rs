use proptest::prelude::*;
use relaunch_core::{
    LastInsertId, LaunchParametersRecord, LaunchTaskRecord, MemoryRow, ProductRecord, Record,
    SchemaEntry, TaskTypeRecord, UserRecord,
};
use relaunch_db::{MissingPolicy, SqliteParser};

fn reparse<R: Record>(record: &R) -> R {
    let mut parsed = R::default();
    SqliteParser::new(MissingPolicy::Error)
        .populate(&mut parsed, &MemoryRow::from_record(record))
        .unwrap();
    parsed
}

fn product() -> impl Strategy<Value = ProductRecord> {
    (
        any::<i64>(),
        "\\PC{0,24}",
        "[a-z0-9-]{0,24}",
        any::<i64>(),
        "[a-z_0-9]{0,16}",
        "[A-Za-z:\\\\ ]{0,24}",
        "[0-9: -]{0,19}",
    )
        .prop_map(
            |(product_id, title, slug, platform_id, release_key, install_path, install_date)| {
                ProductRecord {
                    product_id,
                    title,
                    slug,
                    platform_id,
                    release_key,
                    install_path,
                    install_date,
                }
            },
        )
}

fn launch_task() -> impl Strategy<Value = LaunchTaskRecord> {
    (
        any::<i64>(),
        "[a-z_0-9]{0,16}",
        any::<i64>(),
        any::<i64>(),
        0_i64..10,
        "[A-Za-z]{0,12}",
        any::<bool>(),
    )
        .prop_map(
            |(id, release_key, user_id, order, type_id, type_name, is_primary)| LaunchTaskRecord {
                id,
                release_key,
                user_id,
                order,
                type_id,
                type_name,
                is_primary,
            },
        )
}

fn launch_parameters() -> impl Strategy<Value = LaunchParametersRecord> {
    (any::<i64>(), "\\PC{0,32}", "\\PC{0,32}", "\\PC{0,16}").prop_map(
        |(task_id, executable_path, command_line_args, label)| LaunchParametersRecord {
            task_id,
            executable_path,
            command_line_args,
            label,
        },
    )
}

fn schema_entry() -> impl Strategy<Value = SchemaEntry> {
    (
        prop::sample::select(vec!["table", "view", "index", "trigger"]),
        "[A-Za-z ]{1,24}",
        "[A-Za-z ]{1,24}",
        any::<i64>(),
    )
        .prop_map(|(entry_type, name, table_name, root_page)| SchemaEntry {
            entry_type: entry_type.to_string(),
            name,
            table_name,
            root_page,
        })
}

proptest! {
    #[test]
    fn product_survives_field_export(product in product()) {
        prop_assert_eq!(reparse(&product), product);
    }

    #[test]
    fn launch_task_survives_field_export(task in launch_task()) {
        prop_assert_eq!(reparse(&task), task);
    }

    #[test]
    fn launch_parameters_survive_field_export(params in launch_parameters()) {
        prop_assert_eq!(reparse(&params), params);
    }

    #[test]
    fn user_survives_field_export(id in any::<i64>()) {
        let user = UserRecord { id };
        prop_assert_eq!(reparse(&user), user);
    }

    #[test]
    fn task_type_survives_field_export(id in any::<i64>(), type_name in "[A-Za-z]{0,16}") {
        let ty = TaskTypeRecord { id, type_name };
        prop_assert_eq!(reparse(&ty), ty);
    }

    #[test]
    fn last_insert_id_survives_field_export(id in any::<i64>()) {
        let last = LastInsertId { id };
        prop_assert_eq!(reparse(&last), last);
    }

    #[test]
    fn schema_entry_survives_field_export(entry in schema_entry()) {
        prop_assert_eq!(reparse(&entry), entry);
    }
}
